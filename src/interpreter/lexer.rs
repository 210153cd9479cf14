use std::{fmt, rc::Rc};

use log::{debug, trace};
use logos::Logos;

use crate::error::{LexError, LexErrorKind};

/// Source positions and spans.
///
/// Positions are byte offsets paired with zero-based line and column numbers,
/// plus a shared handle to the source text for error rendering.
pub mod position;

pub use position::{Position, Source, Span};

use position::PositionTracker;

/// Result type produced by [`tokenize`].
pub type LexResult<T> = Result<T, LexError>;

/// The kind of a lexical token, together with its literal payload.
///
/// Keywords are declared as `token`s so that logos prefers them over the
/// identifier pattern when both match the same text.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// Integer literal, such as `42`.
    #[regex(r"[0-9]+", parse_number)]
    Int(f64),
    /// Float literal, such as `3.14` or `1.`.
    ///
    /// Only one decimal point is consumed: `1.2.3` lexes as `1.2` followed by
    /// a stray `.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_number)]
    Float(f64),
    /// String literal, such as `"hello\n"`. The payload is unescaped.
    #[regex(r#""([^"\\\n]|\\.)*""#, unescape)]
    Str(String),
    /// A string literal missing its closing quote.
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedStr,
    /// Identifier tokens; variable or function names such as `x` or `føo_2`.
    #[regex(r"[a-zA-ZÀ-ÖØ-öø-ÿ][a-zA-Z0-9_À-ÖØ-öø-ÿ]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# comments`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    /// `var`
    #[token("var")]
    Var,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `while`
    #[token("while")]
    While,
    /// `fun`
    #[token("fun")]
    Fun,

    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// A `!` that is not part of `!=`. Never survives [`tokenize`].
    #[token("!")]
    Bang,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `->`
    #[token("->")]
    Arrow,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// End of line: a newline or `;`.
    #[token("\n")]
    #[token(";")]
    NewLine,

    /// End of input. Appended by [`tokenize`], never produced by logos.
    Eof,
}

impl TokenKind {
    /// Whether this token ends a statement.
    #[must_use]
    pub const fn is_newline(&self) -> bool {
        matches!(self, Self::NewLine)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Int(n) | Self::Float(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "{s:?}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::UnterminatedStr => "unterminated string",
            Self::Comment => "comment",
            Self::Var => "var",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::For => "for",
            Self::To => "to",
            Self::Step => "step",
            Self::While => "while",
            Self::Fun => "fun",
            Self::Assign => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Bang => "!",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Arrow => "->",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::NewLine => "end of line",
            Self::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A token together with the span of source text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Converts source text into a flat, EOF-terminated token sequence.
///
/// Lexing stops at the first problem: an unrecognized character, a `!` not
/// followed by `=`, or a string literal that never closes.
///
/// # Example
/// ```
/// use quill::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("<doc>", "var x = 1.5").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Var,
///                 TokenKind::Identifier("x".into()),
///                 TokenKind::Assign,
///                 TokenKind::Float(1.5),
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source_name: &str, text: &str) -> LexResult<Vec<Token>> {
    let source = Source::new(source_name, text);
    let mut tracker = PositionTracker::new(Rc::clone(&source));
    let mut lexer = TokenKind::lexer(text);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let start = tracker.at(range.start);

        let kind = match result {
            Ok(TokenKind::Bang) => {
                let end = source.text[range.end..].chars()
                                                  .next()
                                                  .filter(|c| *c != '\n')
                                                  .map_or(range.end, |c| range.end + c.len_utf8());
                let end = tracker.at(end);
                return Err(LexError::new(LexErrorKind::ExpectedCharacter { expected:
                                                                               "'=' (after '!')", },
                                         Span::new(start, end)));
            },
            Ok(TokenKind::UnterminatedStr) => {
                let end = tracker.at(range.end);
                let kind = LexErrorKind::ExpectedCharacter { expected: "'\"' (to close the string)" };
                return Err(LexError::new(kind, Span::new(start, end)));
            },
            Ok(kind) => kind,
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                return Err(LexError::new(LexErrorKind::IllegalCharacter { character },
                                         Span::single(start)));
            },
        };

        let span = if kind.is_newline() {
            Span::single(start)
        } else {
            Span::new(start, tracker.at(range.end))
        };
        tokens.push(Token::new(kind, span));
    }

    let eof = tracker.at(text.len());
    tokens.push(Token::new(TokenKind::Eof, Span::single(eof)));

    debug!("lexed {} tokens from {source_name}", tokens.len());
    trace!("tokens: {:?}",
           tokens.iter().map(|t| &t.kind).collect::<Vec<_>>());

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// `\n` and `\t` become newline and tab; any other escaped character stands
/// for itself, which covers `\\` and `\"`.
fn unescape(lex: &logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize("<test>", src).unwrap()
                               .into_iter()
                               .map(|t| t.kind)
                               .collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("var variable fun funny"),
                   vec![TokenKind::Var,
                        TokenKind::Identifier("variable".into()),
                        TokenKind::Fun,
                        TokenKind::Identifier("funny".into()),
                        TokenKind::Eof]);
    }

    #[test]
    fn two_character_operators_are_greedy() {
        assert_eq!(kinds("== = != <= < >= > -> -"),
                   vec![TokenKind::EqualEqual,
                        TokenKind::Assign,
                        TokenKind::BangEqual,
                        TokenKind::LessEqual,
                        TokenKind::Less,
                        TokenKind::GreaterEqual,
                        TokenKind::Greater,
                        TokenKind::Arrow,
                        TokenKind::Minus,
                        TokenKind::Eof]);
    }

    #[test]
    fn numbers_take_at_most_one_point() {
        assert_eq!(kinds("12 3.25 7."),
                   vec![TokenKind::Int(12.0),
                        TokenKind::Float(3.25),
                        TokenKind::Float(7.0),
                        TokenKind::Eof]);

        let err = tokenize("<test>", "1.2.3").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter { character: '.' });
        assert_eq!(err.span.start.column, 3);
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(kinds(r#""a\tb\n\"c\"\\""#),
                   vec![TokenKind::Str("a\tb\n\"c\"\\".into()), TokenKind::Eof]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("<test>", "\"abc").unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::ExpectedCharacter { .. }));
    }

    #[test]
    fn newlines_semicolons_and_comments() {
        assert_eq!(kinds("1 # one\n2; 3"),
                   vec![TokenKind::Int(1.0),
                        TokenKind::NewLine,
                        TokenKind::Int(2.0),
                        TokenKind::NewLine,
                        TokenKind::Int(3.0),
                        TokenKind::Eof]);
    }

    #[test]
    fn illegal_character_spans_one_column() {
        let err = tokenize("<test>", "1 + @").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter { character: '@' });
        assert_eq!(err.span.start.column, 4);
        assert_eq!(err.span.end.column, 5);
        assert_eq!(err.span.start.line, err.span.end.line);
    }

    #[test]
    fn lone_bang_expects_equals() {
        let err = tokenize("<test>", "!x").unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::ExpectedCharacter { .. }));
        assert_eq!(err.span.start.column, 0);
        assert_eq!(err.span.end.column, 2);
    }

    #[test]
    fn token_positions_follow_lines() {
        let tokens = tokenize("<test>", "a\n  bc").unwrap();
        let bc = &tokens[2];
        assert_eq!(bc.kind, TokenKind::Identifier("bc".into()));
        assert_eq!((bc.span.start.line, bc.span.start.column), (1, 2));
        assert_eq!((bc.span.end.line, bc.span.end.column), (1, 4));

        let newline = &tokens[1];
        assert_eq!(newline.span.start.line, newline.span.end.line);
    }

    #[test]
    fn extended_latin_identifiers() {
        assert_eq!(kinds("æble_2"),
                   vec![TokenKind::Identifier("æble_2".into()), TokenKind::Eof]);
    }
}
