use std::fmt;

use crate::{
    error::{excerpt, location},
    interpreter::lexer::Span,
};

/// An Invalid Syntax error.
///
/// `details` reads like `Expected 'int', 'float', identifier, '+', '-' or
/// '('` and names every token that would have been accepted at `span`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What the parser was looking for.
    pub details: String,
    /// The token that could not be parsed.
    pub span:    Span,
}

impl ParseError {
    /// Builds an error reading `Expected <expected>`.
    #[must_use]
    pub fn expected(expected: &str, span: Span) -> Self {
        Self { details: format!("Expected {expected}"),
               span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "Invalid Syntax: {}\n{}\n\n{}",
               self.details,
               location(&self.span),
               excerpt(&self.span))
    }
}

impl std::error::Error for ParseError {}
