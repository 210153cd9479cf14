use std::io::{self, Write};

use crate::interpreter::value::{Value, ValueKind};

/// Prints a value followed by a newline and returns null.
///
/// The value is formatted using its `Display` implementation, so strings are
/// printed without quotes.
///
/// # Example
/// ```
/// use quill::interpreter::{
///     evaluator::function::print::println,
///     value::{Value, ValueKind},
/// };
///
/// // The value goes to stdout; the doctest only checks the result.
/// let result = println(&[Value::from(42.0)]).unwrap();
/// assert_eq!(result, ValueKind::Null);
/// ```
pub fn println(args: &[Value]) -> Result<ValueKind, String> {
    write_value(&mut io::stdout().lock(), &args[0], true)
}

/// Prints a value without a trailing newline and returns null.
///
/// Standard output is flushed so the text appears before a following
/// `readLine()` blocks.
pub fn print(args: &[Value]) -> Result<ValueKind, String> {
    write_value(&mut io::stdout().lock(), &args[0], false)
}

/// Writes the display form of `value` to `out`, optionally followed by a
/// newline, and flushes.
pub fn write_value(out: &mut impl Write,
                   value: &Value,
                   newline: bool)
                   -> Result<ValueKind, String> {
    let written = if newline {
        writeln!(out, "{value}")
    } else {
        write!(out, "{value}")
    };
    written.and_then(|()| out.flush())
           .map_err(|e| format!("Failed to write to stdout: {e}"))?;
    Ok(ValueKind::Null)
}
