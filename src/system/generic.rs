use super::GameSystemRules;
use crate::config::SystemKind;

/// Plain dice: sums, tests and nothing else.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Generic;

impl GameSystemRules for Generic {
    fn kind(&self) -> SystemKind {
        SystemKind::Generic
    }
}
