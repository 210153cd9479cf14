use std::io::{self, BufRead, Write};

use crate::interpreter::value::{Value, ValueKind};

/// Reads one line from standard input without its line terminator.
///
/// At end of input the result is the empty string.
pub fn read_line(_args: &[Value]) -> Result<ValueKind, String> {
    read_line_from(&mut io::stdin().lock())
}

/// Reads one line from `input`, dropping a trailing `\n` or `\r\n`.
pub fn read_line_from(input: &mut impl BufRead) -> Result<ValueKind, String> {
    let mut line = String::new();
    input.read_line(&mut line)
         .map_err(|e| format!("Failed to read from stdin: {e}"))?;

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(ValueKind::String(trimmed.to_string()))
}

/// Clears the terminal with ANSI escape codes and returns null.
///
/// Best effort: a terminal that ignores the codes, or a failed write, is
/// not an error.
pub fn clear(_args: &[Value]) -> Result<ValueKind, String> {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "\x1b[2J\x1b[H").and_then(|()| stdout.flush());
    Ok(ValueKind::Null)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn string(text: &str) -> ValueKind {
        ValueKind::String(text.to_string())
    }

    #[test]
    fn end_of_input_reads_as_empty() {
        let mut input = Cursor::new("");
        assert_eq!(read_line_from(&mut input).unwrap(), string(""));
    }

    #[test]
    fn terminators_are_dropped() {
        let mut input = Cursor::new("abc\r\ndef\nlast");
        assert_eq!(read_line_from(&mut input).unwrap(), string("abc"));
        assert_eq!(read_line_from(&mut input).unwrap(), string("def"));
        assert_eq!(read_line_from(&mut input).unwrap(), string("last"));
        assert_eq!(read_line_from(&mut input).unwrap(), string(""));
    }

    #[test]
    fn blank_lines_stay_blank() {
        let mut input = Cursor::new("\n  \n");
        assert_eq!(read_line_from(&mut input).unwrap(), string(""));
        assert_eq!(read_line_from(&mut input).unwrap(), string("  "));
    }
}
