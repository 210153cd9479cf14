use std::fmt;

use thiserror::Error;

use crate::{
    error::excerpt,
    interpreter::lexer::{Position, Span},
};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    /// Tried to read or reassign a name bound nowhere in the scope chain.
    #[error("'{name}' is not defined")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A binary operator applied to operand types it does not support.
    #[error("Illegal operation: {left} {op} {right}")]
    IllegalOperation {
        /// The operator as written in source.
        op:    &'static str,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// A unary operator applied to an operand type it does not support.
    #[error("Illegal operation: {op} {operand}")]
    IllegalUnaryOperation {
        /// The operator as written in source.
        op:      &'static str,
        /// Type name of the operand.
        operand: &'static str,
    },
    /// Tried to call something that is not a function.
    #[error("Illegal operation: {found} is not callable")]
    NotCallable {
        /// Type name of the callee.
        found: &'static str,
    },
    /// Division with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,
    /// A call passed more arguments than the function declares.
    #[error("{count} too many args passed into function '{name}'")]
    TooManyArgs {
        /// How many arguments were surplus.
        count: usize,
        /// The function's name.
        name:  String,
    },
    /// A call passed fewer arguments than the function declares.
    #[error("{count} too few args passed into function '{name}'")]
    TooFewArgs {
        /// How many arguments were missing.
        count: usize,
        /// The function's name.
        name:  String,
    },
    /// A list index that is negative, fractional or past the end.
    #[error("Index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// The index as written.
        index: f64,
        /// Length of the list at the time of access.
        len:   usize,
    },
    /// A list index that is not a number.
    #[error("List index must be a Number, found {found}")]
    InvalidIndex {
        /// Type name of the index value.
        found: &'static str,
    },
    /// A loop bound that is not a number.
    #[error("Loop {bound} value must be a Number, found {found}")]
    ExpectedNumber {
        /// Which bound: `start`, `end` or `step`.
        bound: &'static str,
        /// Type name of the value found.
        found: &'static str,
    },
    /// A built-in function failed, for example on an I/O error.
    #[error("{0}")]
    Native(String),
}

/// One entry of a runtime stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Label of the context, such as `<program>` or a function name.
    pub label:    String,
    /// Where execution was inside that context.
    pub position: Position,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "\tat {}({}:{})",
               self.label,
               self.position.source.name,
               self.position.line + 1)
    }
}

/// A runtime failure, the span it points at, and the call stack at the time
/// it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind:  RuntimeErrorKind,
    pub span:  Span,
    /// Frames ordered outermost first, so the last frame is where the error
    /// was raised.
    pub trace: Vec<Frame>,
}

impl RuntimeError {
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Span, trace: Vec<Frame>) -> Self {
        Self { kind, span, trace }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Runtime Error: {}", self.kind)?;
        writeln!(f, "Stacktrace (most recent call last):")?;
        for frame in &self.trace {
            writeln!(f, "{frame}")?;
        }
        write!(f, "\n{}", excerpt(&self.span))
    }
}

impl std::error::Error for RuntimeError {}
