pub mod ast;
mod error;
mod lexer;

pub use error::RuleError;
pub use lexer::{
    tokenize, Token, TokenKind, TokenParsers, TokenRule, DICE_PATTERN, MODIFIER_PATTERN,
    SEPARATOR_PATTERN, TEST_PATTERN,
};
