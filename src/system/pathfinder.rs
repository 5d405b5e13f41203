use super::GameSystemRules;
use crate::common::{parse_num, Int, UInt};
use crate::config::{CritMethod, SystemKind};
use crate::grade::{self, Grade};
use crate::parse::ast::DicePart;
use crate::parse::{RuleError, Token, TokenKind, TokenRule};
use crate::roll::DicePartRoll;
use regex::Regex;

pub const CRIT_PATTERN: &str = r"(?i)\bcrit\s*(\d+)\b";
pub const SAVE_PATTERN: &str = r"(?i)\b(?:fort(?:itude)?|ref(?:lex)?|will|save)\b";

/// d20 rules with degrees of success: a natural 20 against an armor class
/// is a critical hit, a natural 1 a critical miss.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    crit_threshold: UInt,
    save_words: Option<Regex>,
}

impl Pathfinder {
    /// `crit_threshold` is the natural roll that crits when a roll doesn't
    /// name its own. With `infer_saves`, descriptions naming a save mark
    /// the roll as one.
    pub fn new(crit_threshold: UInt, infer_saves: bool) -> Result<Self, RuleError> {
        let save_words = if infer_saves {
            let regex = Regex::new(SAVE_PATTERN).map_err(|source| RuleError::InvalidPattern {
                kind: TokenKind::Description,
                source,
            })?;
            Some(regex)
        } else {
            None
        };
        Ok(Self {
            crit_threshold,
            save_words,
        })
    }

    pub fn crit_threshold(&self) -> UInt {
        self.crit_threshold
    }
}

impl GameSystemRules for Pathfinder {
    fn kind(&self) -> SystemKind {
        SystemKind::Pathfinder
    }

    fn token_rules(&self) -> Result<Vec<TokenRule>, RuleError> {
        Ok(vec![TokenRule::new(TokenKind::Crit, CRIT_PATTERN)?])
    }

    fn apply_token(&self, part: &mut DicePart, token: &Token<'_>) -> bool {
        match token.kind {
            TokenKind::Crit => {
                part.crit_threshold = parse_num("crit threshold", token.capture(1));
                true
            }
            _ => false,
        }
    }

    fn finish_part(&self, part: &mut DicePart) {
        if let Some(words) = &self.save_words {
            if words.is_match(&part.description) {
                part.save = true;
            }
        }
    }

    fn grade(&self, parts: &[DicePartRoll], total: Int) -> Grade {
        let test = parts.iter().find_map(|p| p.part().test());
        let base = grade::grade_test(test, total);
        let (Some(test), Some(d20)) = (test, parts.iter().find(|p| p.part().sides() == 20)) else {
            return base;
        };
        let Some(natural) = d20.natural() else {
            return base;
        };

        if test.alias.is_armor_class() {
            let threshold = parts
                .iter()
                .find_map(|p| p.part().crit_threshold())
                .unwrap_or(self.crit_threshold);
            if natural == 1 {
                Grade::CriticalFailure
            } else if natural >= threshold && base == Grade::Success {
                Grade::CriticalSuccess
            } else {
                base
            }
        } else if parts.iter().any(|p| p.part().is_save()) {
            if natural == 1 {
                Grade::CriticalFailure
            } else if natural == 20 {
                Grade::CriticalSuccess
            } else {
                base
            }
        } else {
            base
        }
    }

    fn crit_method(&self, configured: CritMethod) -> Option<CritMethod> {
        Some(configured)
    }
}
