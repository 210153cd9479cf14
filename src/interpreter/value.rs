/// Core value representation.
///
/// Defines [`Value`], the runtime value with its diagnostic span, and
/// [`ValueKind`], the tagged union of every type in the language.
pub mod core;

/// Operator capabilities.
///
/// Each value type implements [`operations::Operand`]; the evaluator
/// dispatches binary operators to the left operand's implementation.
pub mod operations;

/// Shared, mutable lists.
pub mod list;

/// User-defined and built-in function values.
pub mod function;

pub use self::core::{Value, ValueKind};
