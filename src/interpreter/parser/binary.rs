use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Folds `operand (op operand)*` into a left-associative tree, for every
    /// operator `accepts` allows.
    fn binary_chain(&mut self,
                    operand: fn(&mut Self) -> ParseResult<Node>,
                    accepts: fn(BinaryOperator) -> bool)
                    -> ParseResult<Node> {
        let mut left = operand(self)?;

        while let Some(op) = token_to_binary_operator(&self.current().kind)
              && accepts(op)
        {
            self.advance();
            let right = operand(self)?;
            let span = left.span().to(right.span());
            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    span };
        }

        Ok(left)
    }

    /// Parses `and`/`or` chains. Both share one precedence level.
    ///
    /// Grammar: `logical := compExpr (('and' | 'or') compExpr)*`
    pub(in crate::interpreter::parser) fn logical(&mut self) -> ParseResult<Node> {
        self.binary_chain(Self::comparison, |op| {
                matches!(op, BinaryOperator::And | BinaryOperator::Or)
            })
    }

    /// Parses comparisons and the `not` prefix.
    ///
    /// `not` binds looser than the comparison operators, so `not a == b`
    /// negates the whole comparison.
    ///
    /// Grammar: `compExpr := 'not' compExpr | arithExpr (relOp arithExpr)*`
    pub(in crate::interpreter::parser) fn comparison(&mut self) -> ParseResult<Node> {
        if let Some(not) = self.eat(&TokenKind::Not) {
            let operand = self.comparison()?;
            let span = not.span.to(operand.span());
            return Ok(Node::UnaryOp { op: UnaryOperator::Not,
                                      operand: Box::new(operand),
                                      span });
        }

        self.binary_chain(Self::arithmetic, is_relational_op)
    }

    /// Grammar: `arithExpr := term (('+' | '-') term)*`
    pub(in crate::interpreter::parser) fn arithmetic(&mut self) -> ParseResult<Node> {
        self.binary_chain(Self::term, |op| {
                matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
            })
    }

    /// Grammar: `term := factor (('*' | '/') factor)*`
    pub(in crate::interpreter::parser) fn term(&mut self) -> ParseResult<Node> {
        self.binary_chain(Self::factor, |op| {
                matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
            })
    }

    /// Parses exponentiation.
    ///
    /// The right operand is a full factor, which itself may contain `^`, so
    /// `2 ^ 3 ^ 2` parses as `2 ^ (3 ^ 2)` and `2 ^ -1` is accepted.
    ///
    /// Grammar: `power := call ('^' factor)*`
    pub(in crate::interpreter::parser) fn power(&mut self) -> ParseResult<Node> {
        let mut left = self.call()?;

        while self.eat(&TokenKind::Caret).is_some() {
            let right = self.factor()?;
            let span = left.span().to(right.span());
            left = Node::BinaryOp { left: Box::new(left),
                                    op: BinaryOperator::Pow,
                                    right: Box::new(right),
                                    span };
        }

        Ok(left)
    }
}

/// Maps a token to its corresponding binary operator.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is a binary operator, otherwise
/// `None`.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&TokenKind::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual)
}
