use super::lexer::TokenKind;
use thiserror::Error;

/// A tokenizer rule that cannot be used.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule for {kind} does not compile: {source}")]
    InvalidPattern {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },
    #[error("rule for {kind} matches the empty string")]
    MatchesEmpty { kind: TokenKind },
}
