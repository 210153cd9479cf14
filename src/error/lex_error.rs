use std::fmt;

use thiserror::Error;

use crate::{
    error::{excerpt, location},
    interpreter::lexer::Span,
};

/// What went wrong while lexing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that does not start any token.
    #[error("'{character}'")]
    IllegalCharacter {
        /// The offending character.
        character: char,
    },
    /// A token was started but the character that completes it is missing,
    /// such as `!` without `=` or a string without its closing quote.
    #[error("{expected}")]
    ExpectedCharacter {
        /// Description of the character that was expected.
        expected: &'static str,
    },
}

impl LexErrorKind {
    /// Human-readable name printed at the start of the error report.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "Illegal Character",
            Self::ExpectedCharacter { .. } => "Expected Character",
        }
    }
}

/// A lexing failure and the source text it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}: {}\n{}\n\n{}",
               self.kind.name(),
               self.kind,
               location(&self.span),
               excerpt(&self.span))
    }
}

impl std::error::Error for LexError {}
