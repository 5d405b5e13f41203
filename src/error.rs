use crate::common::{Int, UInt};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Definition(#[from] DefinitionError),
    #[error("{0}")]
    Rule(#[from] crate::parse::RuleError),
}

/// A definition was requested that can never be rolled.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum DefinitionError {
    #[error("dice cannot have a negative number of sides ({0})")]
    NegativeSides(Int),
    #[error("cannot roll a negative number of dice ({0})")]
    NegativeCount(Int),
    #[error("too many dice in one part: {count} (the limit is {max})")]
    TooManyDice { count: Int, max: UInt },
    #[error("expected {expected} fixed rolls, found {found}")]
    FixedRollCount { expected: UInt, found: usize },
    #[error("fixed roll {value} is outside 1..={sides}")]
    FixedRollOutOfRange { value: UInt, sides: UInt },
    #[error("a dice expression can carry only one test")]
    MultipleTests,
}
