use thiserror::Error as ThisError;

use crate::interpreter::lexer::Span;

/// Lexing errors.
///
/// Raised while turning raw text into tokens: characters the language does
/// not know, and constructs that were started but never finished.
pub mod lex_error;
/// Parsing errors.
///
/// Raised when the token stream does not match the grammar. Every parse
/// error names the tokens that would have been accepted instead.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error kinds that can be raised during evaluation, together
/// with the call-stack trace captured when the error was created.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::{Frame, RuntimeError, RuntimeErrorKind};

/// Any error produced while running a program.
///
/// Each pipeline stage has its own error type; this enum lets callers of
/// [`crate::evaluate`] handle all of them through one `Result`.
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The span of source text the error points at.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Lex(e) => &e.span,
            Self::Parse(e) => &e.span,
            Self::Runtime(e) => &e.span,
        }
    }
}

/// Writes the `At <source> (<line>:<column>)` location line, one-based.
pub(crate) fn location(span: &Span) -> String {
    let start = &span.start;
    format!("At {} ({}:{})",
            start.source.name,
            start.line + 1,
            start.column + 1)
}

/// Renders the lines covered by `span`, each followed by a row of carets
/// under the covered columns.
///
/// Tabs are printed as single spaces so the carets stay aligned with the
/// character columns they point at.
pub(crate) fn excerpt(span: &Span) -> String {
    let source = &span.start.source;
    let first = span.start.line;
    let last = span.end.line.max(first);

    let mut rows = Vec::with_capacity(2 * (last - first + 1));
    for line in first..=last {
        let text = source.line_text(line).replace('\t', " ");
        let from = if line == first { span.start.column } else { 0 };
        let to = if line == last {
            span.end.column
        } else {
            text.chars().count()
        };

        let carets = format!("{}{}", " ".repeat(from), "^".repeat(to.saturating_sub(from).max(1)));
        rows.push(text);
        rows.push(carets);
    }
    rows.join("\n")
}
