use crate::interpreter::value::{Value, ValueKind};

/// Applies `predicate` to the single argument and returns `1` or `0`.
fn check(args: &[Value], predicate: fn(&ValueKind) -> bool) -> Result<ValueKind, String> {
    Ok(ValueKind::from_bool(predicate(&args[0].kind)))
}

/// `isNumber(value)`
///
/// # Example
/// ```
/// use quill::interpreter::{
///     evaluator::function::types::is_number,
///     value::{Value, ValueKind},
/// };
///
/// assert_eq!(is_number(&[Value::from(1.0)]).unwrap(), ValueKind::Number(1.0));
/// assert_eq!(is_number(&[Value::from("1")]).unwrap(), ValueKind::Number(0.0));
/// ```
pub fn is_number(args: &[Value]) -> Result<ValueKind, String> {
    check(args, |kind| matches!(kind, ValueKind::Number(_)))
}

/// `isString(value)`
pub fn is_string(args: &[Value]) -> Result<ValueKind, String> {
    check(args, |kind| matches!(kind, ValueKind::String(_)))
}

/// `isList(value)`
pub fn is_list(args: &[Value]) -> Result<ValueKind, String> {
    check(args, |kind| matches!(kind, ValueKind::List(_)))
}

/// `isFunction(value)`, true for user-defined and built-in functions alike.
pub fn is_function(args: &[Value]) -> Result<ValueKind, String> {
    check(args, |kind| matches!(kind, ValueKind::Function(_) | ValueKind::BuiltIn(_)))
}
