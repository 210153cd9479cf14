use std::{fmt, rc::Rc};

/// A named piece of source text.
///
/// Every [`Position`] holds a shared handle to the source it points into, so
/// that errors can render the offending line long after lexing has finished.
#[derive(PartialEq, Eq)]
pub struct Source {
    /// Display name, such as a file name or `<stdin>`.
    pub name: String,
    /// The full text that was lexed.
    pub text: String,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { name: name.into(),
                       text: text.into(), })
    }

    /// Returns the text of the zero-based line `line`, without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        self.text
            .split('\n')
            .nth(line)
            .map_or("", |l| l.trim_end_matches('\r'))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source({:?})", self.name)
    }
}

/// A location in the source.
///
/// `index` is a byte offset into [`Source::text`]; `line` and `column` are
/// zero-based, and `column` counts characters rather than bytes. Positions are
/// plain snapshots: cloning one and advancing the clone never affects the
/// original.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub index:  usize,
    pub line:   usize,
    pub column: usize,
    pub source: Rc<Source>,
}

impl Position {
    /// The position of the first character of `source`.
    #[must_use]
    pub fn start_of(source: Rc<Source>) -> Self {
        Self { index: 0,
               line: 0,
               column: 0,
               source }
    }

    /// Moves past `ch`. A newline moves to column zero of the next line.
    pub fn advance(&mut self, ch: char) {
        self.index += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// A copy of this position moved one column to the right on the same
    /// line. Used as the end of single-column spans such as EOF.
    #[must_use]
    pub fn next_column(&self) -> Self {
        let mut next = self.clone();
        next.index += 1;
        next.column += 1;
        next
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A `(start, end)` pair of positions; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end:   Position,
}

impl Span {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A span covering exactly one column starting at `start`.
    #[must_use]
    pub fn single(start: Position) -> Self {
        let end = start.next_column();
        Self { start, end }
    }

    /// The smallest span starting where `self` starts and ending where `last`
    /// ends.
    #[must_use]
    pub fn to(&self, last: &Self) -> Self {
        Self { start: self.start.clone(),
               end:   last.end.clone(), }
    }
}

/// Walks the source text one character at a time, handing out position
/// snapshots for byte offsets in increasing order.
pub(crate) struct PositionTracker {
    current: Position,
}

impl PositionTracker {
    pub(crate) fn new(source: Rc<Source>) -> Self {
        Self { current: Position::start_of(source) }
    }

    /// Advances to byte offset `target` and returns a snapshot of it.
    ///
    /// Offsets must be requested in non-decreasing order.
    pub(crate) fn at(&mut self, target: usize) -> Position {
        let source = Rc::clone(&self.current.source);
        if let Some(skipped) = source.text.get(self.current.index..target) {
            for ch in skipped.chars() {
                self.current.advance(ch);
            }
        }
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_counts_lines_and_columns() {
        let source = Source::new("<test>", "ab\ncø d");
        let mut tracker = PositionTracker::new(source);

        let b = tracker.at(1);
        assert_eq!((b.line, b.column), (0, 1));

        // 'ø' is two bytes but one column.
        let d = tracker.at("ab\ncø ".len());
        assert_eq!((d.line, d.column, d.index), (1, 3, 7));
    }

    #[test]
    fn snapshots_are_independent() {
        let source = Source::new("<test>", "xyz");
        let mut tracker = PositionTracker::new(source);
        let first = tracker.at(0);
        let _ = tracker.at(3);
        assert_eq!(first.column, 0);
    }

    #[test]
    fn line_text_strips_carriage_returns() {
        let source = Source::new("<test>", "one\r\ntwo");
        assert_eq!(source.line_text(0), "one");
        assert_eq!(source.line_text(1), "two");
        assert_eq!(source.line_text(5), "");
    }
}
