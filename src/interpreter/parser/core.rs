use log::{debug, trace};

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::lexer::{Position, Source, Span, Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Tokens that may start an expression, for error messages.
pub(in crate::interpreter::parser) const EXPRESSION_START: &str =
    "'var', 'if', 'for', 'while', 'fun', int, float, string, identifier, '+', '-', '(', '[' or \
     'not'";

/// Tokens that may continue an expression, reported when the program has
/// unparsed tokens left over.
const OPERATORS: &str =
    "'+', '-', '*', '/', '^', '==', '!=', '<', '>', '<=', '>=', 'and' or 'or'";

/// Outcome of a speculative parse.
///
/// A failure that consumed no tokens means "nothing here"; a failure after
/// consuming tokens is a real syntax error that must be reported.
pub(in crate::interpreter::parser) enum Attempt<T> {
    Parsed(T),
    Failed { consumed: usize, error: ParseError },
}

/// Recursive-descent parser over a token slice.
///
/// The parser never advances past the final token, which [`parse`] checks
/// to be [`TokenKind::Eof`].
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    index:  usize,
}

impl<'t> Parser<'t> {
    /// Creates a parser positioned at the first token. `tokens` must end
    /// with an EOF token.
    #[must_use]
    pub(crate) const fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    /// The token under the cursor.
    pub(in crate::interpreter::parser) fn current(&self) -> &'t Token {
        &self.tokens[self.index]
    }

    /// The token `offset` places ahead of the cursor, or the last token if
    /// that runs off the end.
    pub(in crate::interpreter::parser) fn peek(&self, offset: usize) -> &'t Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.index + offset).min(last)]
    }

    /// Consumes and returns the current token. EOF is never consumed.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    pub(in crate::interpreter::parser) fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Consumes the current token if it is `kind`.
    pub(in crate::interpreter::parser) fn eat(&mut self, kind: &TokenKind) -> Option<&'t Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Skips end-of-line tokens and returns how many were skipped.
    pub(in crate::interpreter::parser) fn skip_newlines(&mut self) -> usize {
        let mut skipped = 0;
        while self.eat(&TokenKind::NewLine).is_some() {
            skipped += 1;
        }
        skipped
    }

    pub(in crate::interpreter::parser) const fn save(&self) -> usize {
        self.index
    }

    pub(in crate::interpreter::parser) const fn restore(&mut self, index: usize) {
        self.index = index;
    }

    /// An Invalid Syntax error at the current token.
    pub(in crate::interpreter::parser) fn error(&self, expected: &str) -> ParseError {
        ParseError::expected(expected, self.current().span.clone())
    }

    /// Runs `rule` and reports how many tokens it consumed if it failed.
    pub(in crate::interpreter::parser) fn attempt<T>(&mut self,
                                                     rule: impl FnOnce(&mut Self)
                                                           -> ParseResult<T>)
                                                     -> Attempt<T> {
        let start = self.index;
        match rule(self) {
            Ok(value) => Attempt::Parsed(value),
            Err(error) => Attempt::Failed { consumed: self.index - start,
                                            error },
        }
    }

    /// Parses a newline-separated statement list.
    ///
    /// Grammar: `statements := EOL* (expr (EOL+ expr)*)? EOL*`
    ///
    /// Each statement after the first is parsed speculatively: if it fails
    /// without consuming a token, the cursor is restored and the list ends
    /// there. That error is handed back so the caller can report it when the
    /// list is not followed by the expected closing token.
    ///
    /// # Returns
    /// A [`Node::StatementList`] and, if the list stopped at something that
    /// was not a statement, the error from trying to parse it.
    pub(in crate::interpreter::parser) fn statements(&mut self)
                                                     -> ParseResult<(Node, Option<ParseError>)> {
        let mut statements = Vec::new();
        let mut stopped_on = None;

        self.skip_newlines();
        loop {
            let checkpoint = self.save();
            match self.attempt(Self::expr) {
                Attempt::Parsed(node) => statements.push(node),
                Attempt::Failed { consumed: 0, error } => {
                    self.restore(checkpoint);
                    stopped_on = Some(error);
                    break;
                },
                Attempt::Failed { error, .. } => return Err(error),
            }
            if self.skip_newlines() == 0 {
                break;
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::single(self.current().span.start.clone()),
        };
        Ok((Node::StatementList { statements, span }, stopped_on))
    }

    /// Parses one expression, including variable declarations and
    /// reassignments.
    ///
    /// Grammar:
    /// ```text
    /// expr := 'var' IDENT ('=' expr)?
    ///       | IDENT '=' expr
    ///       | compExpr (('and' | 'or') compExpr)*
    /// ```
    pub(in crate::interpreter::parser) fn expr(&mut self) -> ParseResult<Node> {
        let start = self.current();
        match &start.kind {
            TokenKind::Var => {
                self.advance();
                let name_token = self.current();
                let TokenKind::Identifier(name) = &name_token.kind else {
                    return Err(self.error("identifier after 'var'"));
                };
                self.advance();

                if self.eat(&TokenKind::Assign).is_none() {
                    return Ok(Node::VarAssign { name:  name.clone(),
                                                value: None,
                                                span:  start.span.to(&name_token.span), });
                }
                let value = self.expr()?;
                let span = start.span.to(value.span());
                Ok(Node::VarAssign { name: name.clone(),
                                     value: Some(Box::new(value)),
                                     span })
            },
            TokenKind::Identifier(name) if self.peek(1).kind == TokenKind::Assign => {
                self.advance();
                self.advance();
                let value = self.expr()?;
                let span = start.span.to(value.span());
                Ok(Node::VarReassign { name: name.clone(),
                                       value: Box::new(value),
                                       span })
            },
            _ => self.logical(),
        }
    }
}

/// Parses a whole program.
///
/// The result is always a [`Node::StatementList`]. Every token up to EOF must
/// belong to it.
///
/// # Example
/// ```
/// use quill::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let tokens = tokenize("<doc>", "var x = 1\nx + 2").unwrap();
/// let Node::StatementList { statements, .. } = parse(&tokens).unwrap() else {
///     panic!("programs parse to statement lists");
/// };
/// assert_eq!(statements.len(), 2);
/// ```
///
/// # Errors
/// Besides syntax errors, a token slice that does not end with
/// [`TokenKind::Eof`] is rejected, since only [`tokenize`] output is
/// well-formed.
///
/// [`tokenize`]: crate::interpreter::lexer::tokenize
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    match tokens.last() {
        Some(last) if last.kind == TokenKind::Eof => {},
        Some(last) => return Err(ParseError::expected("end of input", last.span.clone())),
        None => {
            let start = Position::start_of(Source::new("<empty>", ""));
            return Err(ParseError::expected("end of input", Span::single(start)));
        },
    }

    let mut parser = Parser::new(tokens);
    let (program, stopped_on) = parser.statements()?;

    if !parser.check(&TokenKind::Eof) {
        return Err(stopped_on.unwrap_or_else(|| parser.error(OPERATORS)));
    }

    if let Node::StatementList { statements, .. } = &program {
        debug!("parsed {} top-level statements", statements.len());
    }
    trace!("ast: {program:?}");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, UnaryOperator},
        interpreter::lexer::tokenize,
    };

    fn parse_src(src: &str) -> ParseResult<Node> {
        parse(&tokenize("<test>", src).unwrap())
    }

    fn single(src: &str) -> Node {
        match parse_src(src).unwrap() {
            Node::StatementList { mut statements, .. } => {
                assert_eq!(statements.len(), 1, "expected one statement in {src:?}");
                statements.remove(0)
            },
            other => panic!("expected a statement list, got {other:?}"),
        }
    }

    fn statement_count(src: &str) -> usize {
        match parse_src(src).unwrap() {
            Node::StatementList { statements, .. } => statements.len(),
            other => panic!("expected a statement list, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Node::BinaryOp { op, right, .. } = single("1 + 2 * 3") else {
            panic!("expected a binary op");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*right,
                         Node::BinaryOp { op: BinaryOperator::Mul,
                                          .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let Node::BinaryOp { left, op, right, .. } = single("2 ^ 3 ^ 2") else {
            panic!("expected a binary op");
        };
        assert_eq!(op, BinaryOperator::Pow);
        assert!(matches!(*left, Node::NumberLiteral { .. }));
        assert!(matches!(*right,
                         Node::BinaryOp { op: BinaryOperator::Pow,
                                          .. }));
    }

    #[test]
    fn not_wraps_a_whole_comparison() {
        let Node::UnaryOp { op, operand, .. } = single("not 1 == 2") else {
            panic!("expected a unary op");
        };
        assert_eq!(op, UnaryOperator::Not);
        assert!(matches!(*operand,
                         Node::BinaryOp { op: BinaryOperator::Equal,
                                          .. }));
    }

    #[test]
    fn declarations_and_reassignments() {
        assert!(matches!(single("var x"), Node::VarAssign { value: None, .. }));
        assert!(matches!(single("var x = 1"),
                         Node::VarAssign { value: Some(_), .. }));
        assert!(matches!(single("x = 1"), Node::VarReassign { .. }));
        assert!(matches!(single("x == 1"), Node::BinaryOp { .. }));
    }

    #[test]
    fn blank_lines_and_semicolons_separate_statements() {
        assert_eq!(statement_count("\n\n1\n\n2;3\n\n"), 3);
        assert_eq!(statement_count(""), 0);
        assert_eq!(statement_count("\n;\n"), 0);
    }

    #[test]
    fn node_spans_cover_their_children() {
        let node = single("if x {\n  foo(1, 2)\n}");
        let span = node.span();
        assert_eq!((span.start.line, span.start.column), (0, 0));
        assert_eq!((span.end.line, span.end.column), (2, 1));

        let node = single("foo(1, 2)");
        assert_eq!(node.span().end.column, 9);
    }

    #[test]
    fn indexing_applies_to_any_primary() {
        assert!(matches!(single("[1, 2, 3][5]"), Node::ListIndexAccess { .. }));
        let Node::ListIndexAccess { target, .. } = single("xs[0][1]") else {
            panic!("expected an index access");
        };
        assert!(matches!(*target, Node::ListIndexAccess { .. }));
    }

    #[test]
    fn else_may_start_on_a_later_line() {
        let Node::If { cases, else_case, .. } = single("if 0 { 1 }\nelif 1 { 2 }\n\nelse { 3 }")
        else {
            panic!("expected an if");
        };
        assert_eq!(cases.len(), 2);
        assert!(else_case.is_some());

        assert_eq!(statement_count("if 0 { 1 }\n5"), 2);
    }

    #[test]
    fn block_suppression_follows_the_newline_after_the_brace() {
        let Node::While { suppress_result, .. } = single("while 0 { 1 }") else {
            panic!("expected a while");
        };
        assert!(!suppress_result);

        let Node::For { suppress_result, .. } = single("for i = 0 to 3 {\n i\n}") else {
            panic!("expected a for");
        };
        assert!(suppress_result);
    }

    #[test]
    fn function_suppression_follows_the_arrow() {
        let Node::FunctionDef { def, .. } = single("fun f(a, b) { a + b }") else {
            panic!("expected a function");
        };
        assert!(def.suppress_result);
        assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);

        let Node::FunctionDef { def, .. } = single("fun (x) -> { x }") else {
            panic!("expected a function");
        };
        assert!(!def.suppress_result);
        assert!(def.name.is_none());
    }

    #[test]
    fn anonymous_functions_require_an_arrow() {
        let err = parse_src("fun (x) { x }").unwrap_err();
        assert_eq!(err.details, "Expected '->' after anonymous function");
    }

    #[test]
    fn leftover_tokens_report_the_operators() {
        let err = parse_src("1 2").unwrap_err();
        assert!(err.details.starts_with("Expected '+', '-'"));
        assert_eq!(err.span.start.column, 2);
    }

    #[test]
    fn failures_after_consuming_tokens_are_reported() {
        let err = parse_src("1\nvar = 2").unwrap_err();
        assert_eq!(err.details, "Expected identifier after 'var'");

        let err = parse_src("1\n)").unwrap_err();
        assert!(err.details.starts_with("Expected 'var'"));
    }

    #[test]
    fn unclosed_blocks_are_errors() {
        let err = parse_src("if 1 { 2").unwrap_err();
        assert_eq!(err.details, "Expected '}'");

        let err = parse_src("while 1 2").unwrap_err();
        assert_eq!(err.details, "Expected '{' after while");
    }

    #[test]
    fn token_slices_must_end_with_eof() {
        let error = parse(&[]).unwrap_err();
        assert_eq!(error.details, "Expected end of input");

        let mut tokens = tokenize("<test>", "1 + 2").unwrap();
        tokens.pop();
        let error = parse(&tokens).unwrap_err();
        assert_eq!(error.details, "Expected end of input");
        assert_eq!(error.span.start.column, 4);
    }
}
