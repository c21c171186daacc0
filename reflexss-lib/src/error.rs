use crate::rule::RuleId;
use std::io;
use thiserror::Error;

/// Everything that can go wrong while building or emitting style rules.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The host asked for a mutation the rule model cannot express
    /// (detaching, swapping, replacing, attributes).
    #[error("operation not supported on style rules: {operation}")]
    Unsupported { operation: &'static str },

    /// A nested reference named an identifier that was never registered.
    #[error("no registered rule with identifier `{0}`")]
    UnknownRule(String),

    /// A handle that does not belong to this library's arena.
    #[error("rule handle {0} does not exist")]
    InvalidRule(RuleId),

    /// The rule was already returned to the library and can no longer change.
    #[error("rule {0} is already registered and cannot be modified")]
    Sealed(RuleId),

    #[error("failed to write to style sink: {0}")]
    Sink(#[from] io::Error),

    /// lightningcss rejected the emitted document while minifying.
    #[error("failed to minify emitted css: {0}")]
    Minify(String),
}

pub type Result<T> = std::result::Result<T, StyleError>;

impl StyleError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        StyleError::Unsupported { operation }
    }
}
