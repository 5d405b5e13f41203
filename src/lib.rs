//! Rolls tabletop dice notation such as `2d6+3 vs 10`, `1d20+7 ac 18 2d6+4`
//! or `5d10 h2 vs 3`, grades each roll under a game system and renders the
//! result at a chosen verbosity.
//!
//! ```no_run
//! let eval = rpg_dice::roll("4d6k3 strength").unwrap();
//! println!("{}", eval.output);
//! ```

pub mod common;
mod config;
mod engine;
mod error;
mod grade;
pub mod parse;
pub mod roll;
pub mod system;

pub use config::{CritMethod, EngineConfig, SystemKind, UnknownSetting, Verbosity};
pub use engine::{DiceEngine, Evaluation};
pub use error::{DefinitionError, Error};
pub use grade::{grade_test, Grade};
pub use parse::ast::{Dice, DiceGroup, DicePart, Test, MAX_DICE};
pub use roll::{DiceGroupRoll, DicePartRoll, DiceRoll, Roller, ScriptedRoller};
pub use system::{GameSystem, GameSystemRules};

pub(crate) type DefaultRng = rand::rngs::ThreadRng;

/// Rolls `input` with the default configuration and thread-local randomness.
pub fn roll(input: &str) -> Result<Evaluation, Error> {
    let engine = DiceEngine::new(EngineConfig::default())?;
    let mut rng: DefaultRng = rand::thread_rng();
    Ok(engine.evaluate(input, &mut rng))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_roll() {
        let eval = crate::roll("3d6+1 vs 4").unwrap();
        let total = eval.roll.rolls()[0].total();
        assert!((4..=19).contains(&total));
        assert_eq!(eval.output, format!("[success] ({}) ← 3d6+1 vs 4", total));
    }
}
