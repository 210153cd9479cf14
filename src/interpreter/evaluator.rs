/// Core evaluation logic.
///
/// Holds the node dispatch, literals, variables and statement lists.
pub mod core;

/// Unary operator evaluation: `+`, `-` and `not`.
pub mod unary;

/// Binary operator evaluation.
///
/// Evaluates both operands and hands them to the left operand's operator
/// capabilities.
pub mod binary;

/// Loop evaluation.
///
/// Implements `for` and `while`, which collect their body values into a list
/// unless written in statement form.
pub mod for_loop;

/// Conditionals, list literals and list indexing.
pub mod utils;

/// Function definitions, calls and the built-in function table.
pub mod function;
