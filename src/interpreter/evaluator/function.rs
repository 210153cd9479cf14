/// Function definitions and calls.
///
/// Creates closures, checks arity and runs bodies in a fresh context.
pub mod core;

/// The built-in function table installed into the root context.
pub mod builtin;

/// The `print` and `println` built-ins.
///
/// Output goes to standard output.
pub mod print;

/// The `readLine` and `clear` built-ins.
pub mod input;

/// Type predicates: `isNumber`, `isString`, `isList` and `isFunction`.
pub mod types;
