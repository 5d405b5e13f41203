use std::fmt::{self, Write};
use std::str::FromStr;
pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = std::num::NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// How a part combines with the running total of the parts before it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
    Times,
}

impl Sign {
    pub fn apply(self, total: Int, value: Int) -> Int {
        match self {
            Self::Plus => total.saturating_add(value),
            Self::Minus => total.saturating_sub(value),
            Self::Times => total.saturating_mul(value),
        }
    }

    /// Parses a captured sign. Anything unrecognised reads as `+`.
    pub(crate) fn from_capture(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("-") => Self::Minus,
            Some("*") => Self::Times,
            _ => Self::Plus,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    #[default]
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn compare(self, left: Int, right: Int) -> bool {
        match self {
            Self::Lt => left < right,
            Self::Gt => left > right,
            Self::Le => left <= right,
            Self::Ge => left >= right,
            Self::Eq => left == right,
            Self::Ne => left != right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The label a test was written with. Every alias compares with `>=` except
/// [TargetKind::Operator], which carries whatever operator was spelled out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TargetKind {
    Vs,
    Ac,
    Kac,
    Eac,
    Dc,
    Operator,
}

impl TargetKind {
    pub fn is_armor_class(&self) -> bool {
        matches!(self, Self::Ac | Self::Kac | Self::Eac)
    }

    /// Translates a captured alias into a target kind and the operator it
    /// compares with. Unknown operators fall back to `>=`.
    pub(crate) fn parse_alias(raw: &str) -> (Self, CompareOp) {
        let lower = raw.trim().to_ascii_lowercase();
        let (saw_vs, rest) = match lower.strip_prefix("vs") {
            Some(rest) => (true, rest.trim_start()),
            None => (false, lower.as_str()),
        };
        match rest {
            "" if saw_vs => (Self::Vs, CompareOp::Ge),
            "ac" => (Self::Ac, CompareOp::Ge),
            "kac" => (Self::Kac, CompareOp::Ge),
            "eac" => (Self::Eac, CompareOp::Ge),
            "dc" => (Self::Dc, CompareOp::Ge),
            "gteq" | ">=" | "=>" => (Self::Operator, CompareOp::Ge),
            "gt" | ">" => (Self::Operator, CompareOp::Gt),
            "lteq" | "<=" | "=<" => (Self::Operator, CompareOp::Le),
            "lt" | "<" => (Self::Operator, CompareOp::Lt),
            "eq" | "=" | "==" => (Self::Operator, CompareOp::Eq),
            "!=" | "<>" => (Self::Operator, CompareOp::Ne),
            other => {
                tracing::debug!(alias = other, "unsupported test operator, using >=");
                (Self::Operator, CompareOp::Ge)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Extremity {
    Highest,
    Lowest,
}

impl fmt::Display for Extremity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Highest => 'h',
            Self::Lowest => 'l',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DropKeep {
    Keep(Extremity, UInt),
    Drop(Extremity, UInt),
}

impl DropKeep {
    pub const fn keep_highest(n: UInt) -> Self {
        Self::Keep(Extremity::Highest, n)
    }

    pub const fn keep_lowest(n: UInt) -> Self {
        Self::Keep(Extremity::Lowest, n)
    }

    pub const fn drop_highest(n: UInt) -> Self {
        Self::Drop(Extremity::Highest, n)
    }

    pub const fn drop_lowest(n: UInt) -> Self {
        Self::Drop(Extremity::Lowest, n)
    }

    /// Builds a selector from the captured `k`/`d`, optional `h`/`l` and
    /// count. A bare `k` keeps the highest, a bare `d` drops the lowest.
    pub(crate) fn from_captures(op: &str, ext: Option<&str>, n: UInt) -> Option<Self> {
        let ext = match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("h") => Some(Extremity::Highest),
            Some("l") => Some(Extremity::Lowest),
            _ => None,
        };
        match op.to_ascii_lowercase().as_str() {
            "k" => Some(Self::Keep(ext.unwrap_or(Extremity::Highest), n)),
            "d" => Some(Self::Drop(ext.unwrap_or(Extremity::Lowest), n)),
            _ => None,
        }
    }

    /// How many of `count` dice still count after this rule.
    pub fn kept_count(&self, count: UInt) -> UInt {
        match *self {
            Self::Keep(_, n) => n.min(count),
            Self::Drop(_, n) => count.saturating_sub(n),
        }
    }

    /// The same rule over `factor` times as many dice.
    pub fn scaled(&self, factor: UInt) -> Self {
        match *self {
            Self::Keep(ext, n) => Self::Keep(ext, n.saturating_mul(factor)),
            Self::Drop(ext, n) => Self::Drop(ext, n.saturating_mul(factor)),
        }
    }

    /// Returns, for each of `values`, whether it counts toward the total.
    /// Ties are broken by roll order.
    pub fn select(&self, values: &[UInt]) -> Vec<bool> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        let (ext, n, keep) = match *self {
            Self::Keep(ext, n) => (ext, n, true),
            Self::Drop(ext, n) => (ext, n, false),
        };
        match ext {
            Extremity::Highest => order.sort_by(|&a, &b| values[b].cmp(&values[a])),
            Extremity::Lowest => order.sort_by(|&a, &b| values[a].cmp(&values[b])),
        }
        let chosen = &order[..(n as usize).min(order.len())];
        (0..values.len())
            .map(|i| chosen.contains(&i) == keep)
            .collect()
    }
}

impl fmt::Display for DropKeep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep(ext, n) => write!(f, "k{}{}", ext, n),
            Self::Drop(ext, n) => write!(f, "d{}{}", ext, n),
        }
    }
}

/// Collects `items` into a [NonEmpty], using `fallback` when there are none.
pub(crate) fn non_empty_or<T>(items: Vec<T>, fallback: impl FnOnce() -> T) -> NonEmpty<T> {
    let mut iter = items.into_iter();
    let mut out = NonEmpty::new(iter.next().unwrap_or_else(fallback));
    for item in iter {
        out.push(item);
    }
    out
}

/// Parses a captured number, treating anything unparsable as absent.
pub(crate) fn parse_num<T: FromStr>(field: &'static str, s: Option<&str>) -> Option<T> {
    let s = s?.trim();
    match s.parse() {
        Ok(x) => Some(x),
        Err(_) => {
            tracing::debug!(field, value = s, "discarding unparsable number");
            None
        }
    }
}
