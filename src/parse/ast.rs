use super::lexer::{Token, TokenKind};
use crate::common::*;
use crate::config::{CritMethod, Verbosity};
use crate::error::DefinitionError;
use crate::system::{GameSystem, GameSystemRules};
use std::fmt::{self, Write};

/// The most dice a single part may roll.
pub const MAX_DICE: UInt = 1000;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Test {
    pub alias: TargetKind,
    pub op: CompareOp,
    pub value: Int,
    pub hidden: bool,
}

impl Test {
    pub const fn new(alias: TargetKind, op: CompareOp, value: Int) -> Self {
        Self {
            alias,
            op,
            value,
            hidden: false,
        }
    }

    pub const fn vs(value: Int) -> Self {
        Self::new(TargetKind::Vs, CompareOp::Ge, value)
    }

    pub const fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn passes(&self, total: Int) -> bool {
        self.op.compare(total, self.value)
    }

    /// Reads a test token. A value that doesn't parse means there is no test.
    pub(crate) fn from_token(token: &Token<'_>) -> Option<Self> {
        let (alias, op) = TargetKind::parse_alias(token.capture(1)?);
        let raw = token.capture(2)?.trim();
        let unwrapped = raw.strip_prefix("||").and_then(|s| s.strip_suffix("||"));
        let value = parse_num("test value", Some(unwrapped.unwrap_or(raw)))?;
        Some(Self {
            alias,
            op,
            value,
            hidden: unwrapped.is_some(),
        })
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alias {
            TargetKind::Vs => f.write_str("vs ")?,
            TargetKind::Ac => f.write_str("AC ")?,
            TargetKind::Kac => f.write_str("KAC ")?,
            TargetKind::Eac => f.write_str("EAC ")?,
            TargetKind::Dc => f.write_str("DC ")?,
            TargetKind::Operator => write!(f, "{} ", self.op)?,
        }
        if self.hidden {
            f.write_str("??")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// The smallest rollable unit: `count` dice of `sides` faces plus a flat
/// modifier, combined with the parts before it through `sign`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct DicePart {
    pub(crate) count: UInt,
    pub(crate) sides: UInt,
    pub(crate) modifier: Int,
    pub(crate) sign: Sign,
    pub(crate) drop_keep: Option<DropKeep>,
    pub(crate) no_sort: bool,
    pub(crate) description: String,
    pub(crate) test: Option<Test>,
    pub(crate) fixed_rolls: Option<Vec<UInt>>,
    pub(crate) hunger: Option<UInt>,
    pub(crate) crit_threshold: Option<UInt>,
    pub(crate) save: bool,
}

impl DicePart {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dice(count: Int, sides: Int) -> Result<Self, DefinitionError> {
        if sides < 0 {
            return Err(DefinitionError::NegativeSides(sides));
        }
        if count < 0 {
            return Err(DefinitionError::NegativeCount(count));
        }
        if count > MAX_DICE as Int {
            return Err(DefinitionError::TooManyDice {
                count,
                max: MAX_DICE,
            });
        }
        Ok(Self {
            count: count as UInt,
            sides: UInt::try_from(sides).unwrap_or(UInt::MAX),
            ..Self::default()
        })
    }

    pub fn modifier(sign: Sign, value: Int) -> Self {
        Self {
            sign,
            modifier: value,
            ..Self::default()
        }
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    pub fn with_modifier(mut self, modifier: Int) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_drop_keep(mut self, drop_keep: DropKeep) -> Self {
        self.drop_keep = Some(drop_keep);
        self
    }

    pub fn with_test(mut self, test: Test) -> Self {
        self.test = Some(test);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_no_sort(mut self, no_sort: bool) -> Self {
        self.no_sort = no_sort;
        self
    }

    pub fn with_hunger(mut self, hunger: UInt) -> Self {
        self.hunger = Some(hunger);
        self
    }

    pub fn with_crit_threshold(mut self, threshold: UInt) -> Self {
        self.crit_threshold = Some(threshold);
        self
    }

    /// Marks this part as a saving throw.
    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Replaces random rolling with `rolls`, which must hold one in-range
    /// value per die.
    pub fn with_fixed_rolls(mut self, rolls: Vec<UInt>) -> Result<Self, DefinitionError> {
        if rolls.len() != self.count as usize {
            return Err(DefinitionError::FixedRollCount {
                expected: self.count,
                found: rolls.len(),
            });
        }
        if let Some(&value) = rolls.iter().find(|&&v| v == 0 || v > self.sides) {
            return Err(DefinitionError::FixedRollOutOfRange {
                value,
                sides: self.sides,
            });
        }
        self.fixed_rolls = Some(rolls);
        Ok(self)
    }

    pub fn count(&self) -> UInt {
        self.count
    }

    pub fn sides(&self) -> UInt {
        self.sides
    }

    pub fn modifier_value(&self) -> Int {
        self.modifier
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn drop_keep(&self) -> Option<DropKeep> {
        self.drop_keep
    }

    pub fn no_sort(&self) -> bool {
        self.no_sort
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn test(&self) -> Option<&Test> {
        self.test.as_ref()
    }

    pub fn fixed_rolls(&self) -> Option<&[UInt]> {
        self.fixed_rolls.as_deref()
    }

    pub fn hunger(&self) -> Option<UInt> {
        self.hunger
    }

    pub fn crit_threshold(&self) -> Option<UInt> {
        self.crit_threshold
    }

    pub fn is_save(&self) -> bool {
        self.save
    }

    /// Whether this part rolls anything.
    pub fn has_dice(&self) -> bool {
        self.count > 0 && self.sides > 0
    }

    /// No dice, no modifier, no test and no description: a part that only
    /// holds a place and contributes nothing.
    pub fn is_empty(&self) -> bool {
        self.sides == 0 && self.modifier == 0 && self.test.is_none() && self.description.is_empty()
    }

    /// The highest value the dice of this part can show, ignoring the modifier.
    /// Highest sum the kept dice can show, before the sign is applied.
    pub fn max_dice_value(&self) -> Int {
        let kept = match self.drop_keep {
            Some(dk) => dk.kept_count(self.count),
            None => self.count,
        };
        kept as Int * self.sides as Int
    }

    /// Reduces one part's worth of tokens.
    pub fn from_tokens(tokens: &[Token<'_>], rules: &GameSystem) -> Self {
        let mut part = Self::empty();
        let mut description = String::new();

        for token in tokens {
            match token.kind {
                TokenKind::Dice => part.apply_dice(token),
                TokenKind::Modifier => part.apply_modifier(token),
                TokenKind::Test => match Test::from_token(token) {
                    Some(test) => part.test = Some(test),
                    None => description.push_str(token.raw),
                },
                TokenKind::Separator => {}
                _ => {
                    if !rules.apply_token(&mut part, token) {
                        description.push_str(token.raw);
                    }
                }
            }
        }

        part.description = description.split_whitespace().collect::<Vec<_>>().join(" ");
        rules.finish_part(&mut part);
        part
    }

    fn apply_dice(&mut self, token: &Token<'_>) {
        self.sign = Sign::from_capture(token.capture(1));
        self.count = match token.capture(2) {
            None => 1,
            Some(count) => parse_num::<UInt>("dice count", Some(count))
                .filter(|&n| n <= MAX_DICE)
                .unwrap_or(0),
        };
        self.sides = parse_num("dice sides", token.capture(3)).unwrap_or(0);
        self.drop_keep = token.capture(4).and_then(|op| {
            let n = parse_num("drop/keep count", token.capture(6))?;
            DropKeep::from_captures(op, token.capture(5), n)
        });
    }

    fn apply_modifier(&mut self, token: &Token<'_>) {
        let sign = Sign::from_capture(token.capture(1));
        let Some(value) = parse_num::<Int>("modifier", token.capture(2)) else {
            return;
        };
        if self.sides == 0 {
            self.sign = sign;
            self.modifier = value;
            return;
        }
        match sign {
            Sign::Plus => self.modifier = self.modifier.saturating_add(value),
            Sign::Minus => self.modifier = self.modifier.saturating_sub(value),
            Sign::Times => tracing::debug!(value, "ignoring multiplier attached to dice"),
        }
    }

    fn has_notation(&self) -> bool {
        self.sides > 0 || self.modifier != 0 || self.hunger.is_some() || self.crit_threshold.is_some()
    }

    /// The sign to print ahead of this part, folding a negative flat
    /// modifier into the sign.
    pub(crate) fn display_sign(&self) -> Sign {
        match self.sign {
            Sign::Plus if self.sides == 0 && self.modifier < 0 => Sign::Minus,
            Sign::Minus if self.sides == 0 && self.modifier < 0 => Sign::Plus,
            sign => sign,
        }
    }
}

/// The notation of a part without its leading sign.
impl fmt::Display for DicePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sides > 0 {
            write!(f, "{}d{}", self.count, self.sides)?;
            if let Some(dk) = self.drop_keep {
                write!(f, "{}", dk)?;
            }
            if self.modifier > 0 {
                write!(f, "+{}", self.modifier)?;
            } else if self.modifier < 0 {
                write!(f, "{}", self.modifier)?;
            }
        } else if self.modifier != 0 {
            write!(f, "{}", self.modifier.unsigned_abs())?;
        }
        if let Some(hunger) = self.hunger {
            write!(f, " h{}", hunger)?;
        }
        if let Some(crit) = self.crit_threshold {
            write!(f, " crit{}", crit)?;
        }
        Ok(())
    }
}

/// Writes the dice notation of `parts`, followed by the test if one of them
/// carries it.
pub(crate) fn write_notation<'p>(
    f: &mut impl Write,
    parts: impl IntoIterator<Item = &'p DicePart>,
) -> fmt::Result {
    let mut first = true;
    let mut test = None;
    for part in parts {
        test = test.or(part.test.as_ref());
        if !part.has_notation() {
            continue;
        }
        match (first, part.display_sign()) {
            (true, Sign::Plus) => {}
            (_, sign) => write!(f, "{}", sign)?,
        }
        write!(f, "{}", part)?;
        first = false;
    }
    if let Some(test) = test {
        if !first {
            f.write_char(' ')?;
        }
        write!(f, "{}", test)?;
    }
    Ok(())
}

/// One roll expression: parts that are added, subtracted or multiplied
/// together, at most one of which carries a test.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Dice {
    parts: NonEmpty<DicePart>,
}

impl Dice {
    pub fn new(parts: NonEmpty<DicePart>) -> Result<Self, DefinitionError> {
        if parts.iter().filter(|p| p.test.is_some()).count() > 1 {
            return Err(DefinitionError::MultipleTests);
        }
        Ok(Self::normalized(parts))
    }

    pub fn single(part: DicePart) -> Self {
        Self::normalized(NonEmpty::new(part))
    }

    pub fn from_tokens(tokens: &[Token<'_>], rules: &GameSystem) -> Self {
        let parts = partition_parts(tokens)
            .into_iter()
            .map(|run| DicePart::from_tokens(run, rules))
            .collect();
        Self::normalized(non_empty_or(parts, DicePart::empty))
    }

    /// A test with nothing to roll becomes a test on an implicit `1d20`.
    fn normalized(mut parts: NonEmpty<DicePart>) -> Self {
        if !parts.iter().any(|p| p.sides > 0) {
            if let Some(part) = parts.iter_mut().find(|p| p.test.is_some()) {
                match part.sign {
                    Sign::Plus => {}
                    Sign::Minus => {
                        part.modifier = -part.modifier;
                        part.sign = Sign::Plus;
                    }
                    Sign::Times => part.sign = Sign::Plus,
                }
                part.count = 1;
                part.sides = 20;
            }
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[DicePart] {
        &self.parts
    }

    pub fn test(&self) -> Option<&Test> {
        self.parts.iter().find_map(|p| p.test.as_ref())
    }

    pub fn description(&self) -> String {
        join_descriptions(self.parts.iter())
    }

    pub fn has_dice(&self) -> bool {
        self.parts.iter().any(DicePart::has_dice)
    }
}

pub(crate) fn join_descriptions<'p>(parts: impl IntoIterator<Item = &'p DicePart>) -> String {
    parts
        .into_iter()
        .map(DicePart::description)
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_notation(f, self.parts.iter())
    }
}

/// Everything submitted in one command.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DiceGroup {
    dice: NonEmpty<Dice>,
    verbosity: Verbosity,
    crit_method: CritMethod,
}

impl DiceGroup {
    pub fn new(dice: NonEmpty<Dice>) -> Self {
        Self {
            dice,
            verbosity: Verbosity::default(),
            crit_method: CritMethod::default(),
        }
    }

    pub fn from_tokens(tokens: &[Token<'_>], rules: &GameSystem) -> Self {
        let runs: Vec<_> = partition_dice(tokens)
            .into_iter()
            .filter(|run| {
                run.iter()
                    .any(|t| t.kind != TokenKind::Description || !t.raw.trim().is_empty())
            })
            .collect();
        let dice = if runs.is_empty() {
            vec![Dice::from_tokens(tokens, rules)]
        } else {
            runs.into_iter().map(|run| Dice::from_tokens(run, rules)).collect()
        };
        tracing::debug!(dice = dice.len(), "built dice group");
        Self::new(non_empty_or(dice, || Dice::single(DicePart::empty())))
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_crit_method(mut self, crit_method: CritMethod) -> Self {
        self.crit_method = crit_method;
        self
    }

    pub fn dice(&self) -> &[Dice] {
        &self.dice
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn crit_method(&self) -> CritMethod {
        self.crit_method
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dice) in self.dice.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", dice)?;
        }
        Ok(())
    }
}

/// Splits a group's tokens into one run per [Dice]. A run ends at a `;`,
/// before an unsigned die once the run already rolls or tests something,
/// and before a second test.
fn partition_dice<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut has_roll = false;
    let mut has_test = false;

    for (i, token) in tokens.iter().enumerate() {
        let split = match token.kind {
            TokenKind::Separator => {
                runs.push(&tokens[start..i]);
                start = i + 1;
                has_roll = false;
                has_test = false;
                continue;
            }
            TokenKind::Dice => token.capture(1).is_none() && (has_roll || has_test),
            TokenKind::Test => has_test,
            _ => false,
        };
        if split {
            runs.push(&tokens[start..i]);
            start = i;
            has_roll = false;
            has_test = false;
        }
        match token.kind {
            TokenKind::Dice | TokenKind::Modifier => has_roll = true,
            TokenKind::Test => has_test = true,
            _ => {}
        }
    }
    runs.push(&tokens[start..]);
    runs
}

/// Splits one [Dice]'s tokens into one run per [DicePart]. Each die starts
/// a part, unless the run so far is only description. A flat modifier joins
/// the die before it; a second modifier or a multiplier starts its own part.
fn partition_parts<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut has_dice = false;
    let mut has_modifier = false;
    let mut times = false;

    for (i, token) in tokens.iter().enumerate() {
        let sign = Sign::from_capture(token.capture(1));
        let split = match token.kind {
            TokenKind::Dice => has_dice || has_modifier,
            TokenKind::Modifier => has_modifier || times || (sign == Sign::Times && has_dice),
            _ => false,
        };
        if split {
            runs.push(&tokens[start..i]);
            start = i;
            has_dice = false;
            has_modifier = false;
            times = false;
        }
        match token.kind {
            TokenKind::Dice => has_dice = true,
            TokenKind::Modifier => {
                has_modifier = true;
                times = sign == Sign::Times;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        runs.push(&tokens[start..]);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, SystemKind};

    fn rules(kind: SystemKind) -> GameSystem {
        GameSystem::from_config(&EngineConfig {
            system: kind,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn group_in(kind: SystemKind, s: &str) -> DiceGroup {
        let rules = rules(kind);
        let parsers = crate::parse::TokenParsers::extended(rules.token_rules().unwrap()).unwrap();
        DiceGroup::from_tokens(&parsers.tokenize(s), &rules)
    }

    fn group(s: &str) -> DiceGroup {
        group_in(SystemKind::Generic, s)
    }

    #[test]
    fn test_single_part() {
        let g = group("4d6+2");
        assert_eq!(g.dice().len(), 1);
        let part = &g.dice()[0].parts()[0];
        assert_eq!((part.count(), part.sides(), part.modifier_value()), (4, 6, 2));
        assert_eq!(g.to_string(), "4d6+2");
    }

    #[test]
    fn test_signed_parts() {
        let g = group("2d6 + 1d4 - 1");
        let dice = &g.dice()[0];
        assert_eq!(dice.parts().len(), 2);
        assert_eq!(dice.parts()[1].sign(), Sign::Plus);
        assert_eq!(dice.parts()[1].modifier_value(), -1);
        assert_eq!(dice.to_string(), "2d6+1d4-1");

        let g = group("1d8-1d4");
        assert_eq!(g.dice()[0].parts()[1].sign(), Sign::Minus);
        assert_eq!(g.to_string(), "1d8-1d4");
    }

    #[test]
    fn test_multiplier_part() {
        let g = group("2d6+3*2");
        let parts = g.dice()[0].parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].sign(), Sign::Times);
        assert_eq!(parts[1].modifier_value(), 2);
        assert_eq!(g.to_string(), "2d6+3*2");
    }

    #[test]
    fn test_test_and_description() {
        let g = group("1d20+5 to hit vs AC15");
        let dice = &g.dice()[0];
        let test = dice.test().unwrap();
        assert_eq!(test.alias, TargetKind::Ac);
        assert_eq!(test.value, 15);
        assert_eq!(dice.description(), "to hit");
        assert_eq!(dice.to_string(), "1d20+5 AC 15");
    }

    #[test]
    fn test_hidden_value() {
        let g = group("1d20 dc ||12||");
        let test = g.dice()[0].test().unwrap();
        assert_eq!((test.value, test.hidden), (12, true));
        assert_eq!(g.to_string(), "1d20 DC ??");
    }

    #[test]
    fn test_drop_keep_parse() {
        let g = group("4d6k3");
        assert_eq!(g.dice()[0].parts()[0].drop_keep(), Some(DropKeep::keep_highest(3)));
        assert_eq!(g.to_string(), "4d6kh3");
    }

    #[test]
    fn test_split_on_unsigned_die() {
        let g = group("1d20 ac 18 2d6+4 fire");
        assert_eq!(g.dice().len(), 2);
        assert!(g.dice()[0].test().is_some());
        assert_eq!(g.dice()[1].to_string(), "2d6+4");
        assert_eq!(g.dice()[1].description(), "fire");
    }

    #[test]
    fn test_split_on_separator() {
        let g = group("1d20 ac18; 2d6+4");
        assert_eq!(g.dice().len(), 2);
        assert_eq!(g.to_string(), "1d20 AC 18; 2d6+4");
        assert_eq!(group("1d6;;").dice().len(), 1);
    }

    #[test]
    fn test_split_on_second_test() {
        let g = group("1d20 vs 10 vs 12");
        assert_eq!(g.dice().len(), 2);
        assert_eq!(g.dice()[1].to_string(), "1d20 vs 12");
    }

    #[test]
    fn test_leading_description_stays() {
        let g = group("attack 1d20+3");
        assert_eq!(g.dice().len(), 1);
        assert_eq!(g.dice()[0].parts().len(), 1);
        assert_eq!(g.dice()[0].description(), "attack");
    }

    #[test]
    fn test_unsigned_then_signed_die_stays_together() {
        let g = group("d20+1d6");
        assert_eq!(g.dice().len(), 1);
        assert_eq!(g.to_string(), "1d20+1d6");
    }

    #[test]
    fn test_implicit_d20() {
        let g = group("vs 15");
        let part = &g.dice()[0].parts()[0];
        assert_eq!((part.count(), part.sides()), (1, 20));
        assert_eq!(g.to_string(), "1d20 vs 15");

        let g = group("-2 vs 10");
        assert_eq!(g.to_string(), "1d20-2 vs 10");
    }

    #[test]
    fn test_description_only() {
        let g = group("just talking");
        assert_eq!(g.dice().len(), 1);
        assert!(!g.dice()[0].has_dice());
        assert_eq!(g.dice()[0].description(), "just talking");

        let g = group("");
        assert!(g.dice()[0].parts()[0].is_empty());
    }

    #[test]
    fn test_invalid_numbers_degrade() {
        let g = group("99999999999d6 vs 99999999999999999999");
        let dice = &g.dice()[0];
        assert_eq!(dice.parts()[0].count(), 0);
        assert!(dice.test().is_none());
        assert_eq!(dice.description(), "vs 99999999999999999999");
    }

    #[test]
    fn test_system_tokens() {
        let g = group_in(SystemKind::Vampire, "5d10 h2 vs 3");
        assert_eq!(g.dice()[0].parts()[0].hunger(), Some(2));
        assert_eq!(g.to_string(), "5d10 h2 vs 3");

        let g = group("5d10 h2 vs 3");
        assert_eq!(g.dice()[0].parts()[0].hunger(), None);
        assert_eq!(g.dice()[0].description(), "h2");

        let g = group_in(SystemKind::Pathfinder, "1d20+4 crit19 ac 15");
        assert_eq!(g.dice()[0].parts()[0].crit_threshold(), Some(19));
    }

    #[test]
    fn test_save_inference() {
        let g = group_in(SystemKind::Pathfinder, "1d20+6 fort save dc 18");
        assert!(g.dice()[0].parts()[0].is_save());
        let g = group_in(SystemKind::Pathfinder, "1d20+6 fortress dc 18");
        assert!(!g.dice()[0].parts()[0].is_save());
    }

    #[test]
    fn test_builder_preconditions() {
        assert_eq!(DicePart::dice(1, -6), Err(DefinitionError::NegativeSides(-6)));
        assert_eq!(DicePart::dice(-1, 6), Err(DefinitionError::NegativeCount(-1)));
        assert!(matches!(DicePart::dice(5000, 6), Err(DefinitionError::TooManyDice { .. })));
        let part = DicePart::dice(2, 6).unwrap();
        assert_eq!(
            part.clone().with_fixed_rolls(vec![1]),
            Err(DefinitionError::FixedRollCount { expected: 2, found: 1 })
        );
        assert_eq!(
            part.clone().with_fixed_rolls(vec![1, 7]),
            Err(DefinitionError::FixedRollOutOfRange { value: 7, sides: 6 })
        );
        assert!(part.with_fixed_rolls(vec![6, 1]).is_ok());

        let tested = DicePart::dice(1, 20).unwrap().with_test(Test::vs(10));
        assert_eq!(
            Dice::new(vec1![tested.clone(), tested]),
            Err(DefinitionError::MultipleTests)
        );
    }
}
