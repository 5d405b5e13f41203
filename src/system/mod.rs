//! Game systems: the extra tokens they understand, how they total a roll
//! and how they grade it.

mod generic;
mod pathfinder;
mod vampire;

pub use generic::Generic;
pub use pathfinder::Pathfinder;
pub use vampire::{Pool, Vampire};

use crate::common::Int;
use crate::config::{CritMethod, EngineConfig, SystemKind, Verbosity};
use crate::grade::{self, Grade};
use crate::parse::ast::DicePart;
use crate::parse::{RuleError, Token, TokenRule};
use crate::roll::stringify;
use crate::roll::{arithmetic_total, DicePartRoll, DiceRoll};

#[enum_dispatch::enum_dispatch]
pub trait GameSystemRules {
    fn kind(&self) -> SystemKind;

    /// Tokenizer rules tried ahead of the generic ones.
    fn token_rules(&self) -> Result<Vec<TokenRule>, RuleError> {
        Ok(Vec::new())
    }

    /// Folds a system token into `part`. Returns `false` when the token
    /// means nothing here, so it is kept as description.
    fn apply_token(&self, _part: &mut DicePart, _token: &Token<'_>) -> bool {
        false
    }

    /// Called once a part has seen all of its tokens.
    fn finish_part(&self, _part: &mut DicePart) {}

    fn total(&self, parts: &[DicePartRoll]) -> Int {
        arithmetic_total(parts)
    }

    fn grade(&self, parts: &[DicePartRoll], total: Int) -> Grade {
        grade::grade_test(parts.iter().find_map(|p| p.part().test()), total)
    }

    /// The critical damage method in effect, if this system raises damage
    /// after a critical hit at all.
    fn crit_method(&self, _configured: CritMethod) -> Option<CritMethod> {
        None
    }

    fn glyph(&self, grade: Grade) -> &'static str {
        grade.glyph()
    }

    fn label(&self, grade: Grade) -> &'static str {
        grade.label()
    }

    /// The one-line face breakdown shown from `L` up.
    fn breakdown(&self, roll: &DiceRoll, verbosity: Verbosity) -> String {
        stringify::breakdown(roll, verbosity)
    }

    /// Extra lines shown from `XL` up.
    fn details(&self, roll: &DiceRoll, verbosity: Verbosity) -> Vec<String> {
        stringify::part_details(roll, verbosity)
    }
}

#[enum_dispatch::enum_dispatch(GameSystemRules)]
#[derive(Debug, Clone)]
pub enum GameSystem {
    Generic,
    Pathfinder,
    Vampire,
}

impl GameSystem {
    pub fn from_config(config: &EngineConfig) -> Result<Self, RuleError> {
        Ok(match config.system {
            SystemKind::Generic => Generic.into(),
            SystemKind::Pathfinder => {
                Pathfinder::new(config.crit_threshold, config.infer_saves)?.into()
            }
            SystemKind::Vampire => Vampire.into(),
        })
    }
}

impl Default for GameSystem {
    fn default() -> Self {
        Generic.into()
    }
}
