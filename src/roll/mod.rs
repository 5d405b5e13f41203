mod finalize;
mod roller;
pub mod stringify;
mod tree;

use crate::parse::ast::DiceGroup;
use crate::system::GameSystem;

pub use finalize::critical_damage;
pub use roller::{Roller, ScriptedIter, ScriptedRoller};
pub use stringify::Stringifier;
pub use tree::{arithmetic_total, DiceGroupRoll, DicePartRoll, DiceRoll, Die};

/// Rolls every member of `group`, then raises the damage that follows each
/// critical attack.
pub fn roll_group<R: Roller>(group: &DiceGroup, roller: &mut R, rules: &GameSystem) -> DiceGroupRoll {
    finalize::PendingGroupRoll::roll(group, roller, rules).finalize(rules)
}
