/// Parser state, statement lists and the expression entry point.
///
/// Holds the token cursor and the speculative statement parse that lets a
/// statement list end on trailing blank lines.
pub mod core;

/// Binary operator precedence levels.
///
/// Logical, comparison, additive, multiplicative and exponent levels, each
/// folding a left-associative chain of operands (except `^`, which is
/// right-associative).
pub mod binary;

/// Prefix operators, calls, indexing and primary expressions.
pub mod unary;

/// Brace-delimited constructs: `if`, `for`, `while` and `fun`.
pub mod block;

/// Small shared helpers for expecting tokens and parsing comma lists.
pub mod utils;

pub use self::core::{ParseResult, parse};
