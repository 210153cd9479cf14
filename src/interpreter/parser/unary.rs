use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{EXPRESSION_START, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a signed factor.
    ///
    /// Grammar: `factor := ('+' | '-') factor | power`
    pub(in crate::interpreter::parser) fn factor(&mut self) -> ParseResult<Node> {
        let token = self.current();
        let op = match token.kind {
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Minus => UnaryOperator::Minus,
            _ => return self.power(),
        };

        self.advance();
        let operand = self.factor()?;
        let span = token.span.to(operand.span());
        Ok(Node::UnaryOp { op,
                           operand: Box::new(operand),
                           span })
    }

    /// Parses an optional call on an indexed atom.
    ///
    /// Only one argument list is accepted, so `f(1)(2)` is a syntax error.
    ///
    /// Grammar: `call := atom ('(' (expr (',' expr)*)? ')')?`
    pub(in crate::interpreter::parser) fn call(&mut self) -> ParseResult<Node> {
        let callee = self.atom()?;
        if self.eat(&TokenKind::LParen).is_none() {
            return Ok(callee);
        }

        let (args, close) = self.comma_separated(Self::expr, &TokenKind::RParen, EXPRESSION_START)?;
        let span = callee.span().to(&close.span);
        Ok(Node::Call { callee: Box::new(callee),
                        args,
                        span })
    }

    /// Parses a primary followed by any number of `[index]` suffixes.
    ///
    /// Grammar: `atom := primary ('[' expr ']')*`
    pub(in crate::interpreter::parser) fn atom(&mut self) -> ParseResult<Node> {
        let mut node = self.primary()?;

        while self.eat(&TokenKind::LBracket).is_some() {
            let index = self.expr()?;
            let close = self.expect(&TokenKind::RBracket, "']'")?;
            let span = node.span().to(&close.span);
            node = Node::ListIndexAccess { target: Box::new(node),
                                           index: Box::new(index),
                                           span };
        }

        Ok(node)
    }

    /// Parses literals, names, parenthesized expressions, list literals and
    /// the keyword-introduced constructs.
    fn primary(&mut self) -> ParseResult<Node> {
        let token = self.current();
        let span = token.span.clone();

        match &token.kind {
            TokenKind::Int(value) | TokenKind::Float(value) => {
                self.advance();
                Ok(Node::NumberLiteral { value: *value,
                                         span })
            },
            TokenKind::Str(value) => {
                self.advance();
                Ok(Node::StringLiteral { value: value.clone(),
                                         span })
            },
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Node::VarAccess { name: name.clone(),
                                     span })
            },
            TokenKind::LParen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            },
            TokenKind::LBracket => {
                self.advance();
                let (elements, close) =
                    self.comma_separated(Self::expr, &TokenKind::RBracket, EXPRESSION_START)?;
                Ok(Node::ListLiteral { elements,
                                       span: span.to(&close.span) })
            },
            TokenKind::If => self.if_expr(),
            TokenKind::For => self.for_expr(),
            TokenKind::While => self.while_expr(),
            TokenKind::Fun => self.fun_def(),
            _ => Err(self.error(EXPRESSION_START)),
        }
    }
}
