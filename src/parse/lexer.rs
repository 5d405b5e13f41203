use super::error::RuleError;
use regex::{Captures, Regex};
use std::fmt;
use std::ops::Range;

pub const SEPARATOR_PATTERN: &str = r";";
pub const DICE_PATTERN: &str = r"(?i)(?:([-+*])\s*)?(\d+)?d(\d+)(?:([kd])([hl])?(\d+))?";
pub const MODIFIER_PATTERN: &str = r"([-+*])\s*(\d+)";
pub const TEST_PATTERN: &str = r"(?i)((?:\b(?:vs\s*(?:eac|kac|ac|dc)?|gteq|gt|lteq|lt|eq|eac|kac|ac|dc))|>=|<=|!=|==|=>|=<|<>|=|>|<)\s*(\d+|\|\|\s*\d+\s*\|\|)";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Separator,
    Dice,
    Modifier,
    Test,
    Crit,
    Hunger,
    Description,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Separator => "<separator>",
            Self::Dice => "<dice>",
            Self::Modifier => "<modifier>",
            Self::Test => "<test>",
            Self::Crit => "<crit>",
            Self::Hunger => "<hunger>",
            Self::Description => "<description>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of the input. `raw` is exactly the text that was
/// consumed, so joining every token's `raw` gives back the input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub raw: &'a str,
    pub span: Range<usize>,
    captures: Vec<Option<&'a str>>,
}

impl<'a> Token<'a> {
    fn unmatched(kind: TokenKind, input: &'a str, span: Range<usize>) -> Self {
        Self {
            kind,
            raw: &input[span.clone()],
            span,
            captures: Vec::new(),
        }
    }

    fn matched(kind: TokenKind, caps: &Captures<'a>, offset: usize) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            kind,
            raw: whole.as_str(),
            span: offset + whole.start()..offset + whole.end(),
            captures: caps
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str()).filter(|s| !s.is_empty()))
                .collect(),
        })
    }

    /// The text of capture group `group` (1-based, like the regex it came
    /// from). Empty captures read as `None`.
    pub fn capture(&self, group: usize) -> Option<&'a str> {
        group
            .checked_sub(1)
            .and_then(|i| self.captures.get(i).copied().flatten())
    }

    pub fn captures(&self) -> &[Option<&'a str>] {
        &self.captures
    }
}

#[derive(Debug, Clone)]
pub struct TokenRule {
    kind: TokenKind,
    regex: Regex,
    anchored: Regex,
}

impl TokenRule {
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self, RuleError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| RuleError::InvalidPattern { kind, source })
        };
        let regex = compile(pattern)?;
        if regex.is_match("") {
            return Err(RuleError::MatchesEmpty { kind });
        }
        let anchored = compile(&format!("^(?:{})", pattern))?;
        Ok(Self {
            kind,
            regex,
            anchored,
        })
    }

    /// A non-empty match starting right at the beginning of `haystack`.
    fn match_here<'a>(&self, haystack: &'a str) -> Option<Captures<'a>> {
        self.anchored
            .captures(haystack)
            .filter(|caps| caps.get(0).map_or(false, |m| !m.is_empty()))
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// An ordered set of tokenizer rules. Earlier rules win when two rules
/// match at the same position.
#[derive(Debug, Clone)]
pub struct TokenParsers {
    rules: Vec<TokenRule>,
}

impl TokenParsers {
    pub fn new(rules: Vec<TokenRule>) -> Self {
        Self { rules }
    }

    pub fn generic() -> Result<Self, RuleError> {
        Ok(Self::new(vec![
            TokenRule::new(TokenKind::Separator, SEPARATOR_PATTERN)?,
            TokenRule::new(TokenKind::Dice, DICE_PATTERN)?,
            TokenRule::new(TokenKind::Modifier, MODIFIER_PATTERN)?,
            TokenRule::new(TokenKind::Test, TEST_PATTERN)?,
        ]))
    }

    /// The generic rules with `extensions` tried ahead of them.
    pub fn extended(extensions: Vec<TokenRule>) -> Result<Self, RuleError> {
        let mut rules = extensions;
        rules.extend(Self::generic()?.rules);
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    pub fn tokenize<'a>(&self, input: &'a str) -> Vec<Token<'a>> {
        tokenize(input, self, TokenKind::Description)
    }
}

/// The next match of one rule, found by searching the input from `offset`.
struct Lookahead<'a> {
    offset: usize,
    caps: Option<Captures<'a>>,
}

impl Lookahead<'_> {
    fn start(&self) -> Option<usize> {
        self.caps
            .as_ref()
            .and_then(|caps| caps.get(0))
            .map(|m| self.offset + m.start())
    }

    fn is_empty(&self) -> bool {
        self.caps
            .as_ref()
            .and_then(|caps| caps.get(0))
            .map_or(true, |m| m.is_empty())
    }
}

/// Walks the input once, remembering where each rule matches next so a
/// rule is only searched again after the cursor has passed its match.
struct Scanner<'a, 'p> {
    input: &'a str,
    rules: &'p [TokenRule],
    ahead: Vec<Option<Lookahead<'a>>>,
}

impl<'a, 'p> Scanner<'a, 'p> {
    fn new(input: &'a str, parsers: &'p TokenParsers) -> Self {
        Self {
            input,
            rules: parsers.rules(),
            ahead: parsers.rules().iter().map(|_| None).collect(),
        }
    }

    /// The leftmost non-empty match at or after `pos`, preferring earlier
    /// rules on ties.
    ///
    /// A search always starts at `pos`, so the text before it is invisible
    /// to `\b`. Only the position `pos` itself sees that difference, and
    /// it is checked with the anchored regex on every call. Matches further
    /// right are unaffected, so remembered ones stay valid.
    fn next_match(&mut self, pos: usize) -> Option<Token<'a>> {
        let input: &'a str = self.input;
        let rest = &input[pos..];
        for rule in self.rules {
            if let Some(caps) = rule.match_here(rest) {
                return Token::matched(rule.kind, &caps, pos);
            }
        }

        let mut best: Option<(usize, usize)> = None;
        for (i, rule) in self.rules.iter().enumerate() {
            let stale = match &self.ahead[i] {
                None => true,
                Some(ahead) => ahead.start().map_or(false, |start| start <= pos),
            };
            if stale {
                self.ahead[i] = Some(Lookahead {
                    offset: pos,
                    caps: rule.regex.captures(rest),
                });
            }
            let Some(ahead) = &self.ahead[i] else {
                continue;
            };
            if ahead.is_empty() {
                continue;
            }
            let Some(start) = ahead.start() else {
                continue;
            };
            if best.map_or(true, |(best_start, _)| start < best_start) {
                best = Some((start, i));
            }
        }

        let (_, i) = best?;
        let ahead = self.ahead[i].as_ref()?;
        Token::matched(self.rules[i].kind, ahead.caps.as_ref()?, ahead.offset)
    }
}

/// Splits `input` into tokens. Spans no rule claims become `fallback`
/// tokens. Every iteration consumes at least one byte.
///
/// Each search starts at the end of the previous token, so a token
/// boundary also counts as a word boundary (`1d20ac15` reads the same as
/// `1d20 ac15`).
pub fn tokenize<'a>(input: &'a str, parsers: &TokenParsers, fallback: TokenKind) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut scanner = Scanner::new(input, parsers);
    let mut pos = 0;

    while pos < input.len() {
        match scanner.next_match(pos) {
            Some(token) => {
                if token.span.start > pos {
                    tokens.push(Token::unmatched(fallback, input, pos..token.span.start));
                }
                pos = token.span.end;
                tokens.push(token);
            }
            None => {
                tokens.push(Token::unmatched(fallback, input, pos..input.len()));
                pos = input.len();
            }
        }
    }

    tracing::trace!(input, tokens = tokens.len(), "tokenized");
    tokens
}
