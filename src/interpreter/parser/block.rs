use std::rc::Rc;

use crate::{
    ast::{ElseCase, FunctionDef, IfCase, Node},
    interpreter::{
        lexer::{Span, Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

/// A parsed `{ ... }` body.
struct Block<'t> {
    body:       Node,
    /// The `{` was directly followed by an end of line.
    multi_line: bool,
    close:      &'t Token,
}

/// The arms of an `if` chain and the span end of its last block.
type IfChain = (Vec<IfCase>, Option<Box<ElseCase>>, Span);

impl<'t> Parser<'t> {
    /// Parses `'{' statements '}'`.
    ///
    /// `after` names the construct for the missing-brace message, for
    /// example `Expected '{' after while`.
    fn block(&mut self, after: Option<&str>) -> ParseResult<Block<'t>> {
        let expected = after.map_or_else(|| "'{'".to_string(), |kw| format!("'{{' after {kw}"));
        self.expect(&TokenKind::LBrace, &expected)?;
        let multi_line = self.current().kind.is_newline();

        let (body, stopped_on) = self.statements()?;
        let Some(close) = self.eat(&TokenKind::RBrace) else {
            return Err(stopped_on.unwrap_or_else(|| self.error("'}'")));
        };

        Ok(Block { body,
                   multi_line,
                   close })
    }

    /// Parses an `if` expression with its `elif` and `else` arms.
    ///
    /// Grammar:
    /// `ifExpr := 'if' expr block (EOL* 'elif' expr block)* (EOL* 'else' block)?`
    pub(in crate::interpreter::parser) fn if_expr(&mut self) -> ParseResult<Node> {
        let keyword = self.advance();
        let (cases, else_case, end) = self.if_chain("if")?;
        Ok(Node::If { cases,
                      else_case,
                      span: keyword.span.to(&end) })
    }

    /// Parses one condition and body, then folds in whatever `elif` or `else`
    /// follows, possibly on a later line.
    ///
    /// The cursor sits just after `if` or `elif`.
    fn if_chain(&mut self, keyword: &str) -> ParseResult<IfChain> {
        let condition = self.expr()?;
        let block = self.block(Some(keyword))?;
        let case = IfCase { condition,
                            body: block.body,
                            suppress_result: block.multi_line };

        let checkpoint = self.save();
        self.skip_newlines();

        if self.eat(&TokenKind::Elif).is_some() {
            let (mut cases, else_case, end) = self.if_chain("elif")?;
            cases.insert(0, case);
            return Ok((cases, else_case, end));
        }

        if self.eat(&TokenKind::Else).is_some() {
            let other = self.block(Some("else"))?;
            let else_case = ElseCase { body:            other.body,
                                       suppress_result: other.multi_line, };
            return Ok((vec![case], Some(Box::new(else_case)), other.close.span.clone()));
        }

        self.restore(checkpoint);
        Ok((vec![case], None, block.close.span.clone()))
    }

    /// Parses a counted loop.
    ///
    /// Grammar: `forExpr := 'for' IDENT '=' expr 'to' expr ('step' expr)? block`
    pub(in crate::interpreter::parser) fn for_expr(&mut self) -> ParseResult<Node> {
        let keyword = self.advance();
        let var = self.identifier()?;
        self.expect(&TokenKind::Assign, "'='")?;
        let start = self.expr()?;
        self.expect(&TokenKind::To, "'to'")?;
        let end = self.expr()?;
        let step = if self.eat(&TokenKind::Step).is_some() {
            Some(Box::new(self.expr()?))
        } else {
            None
        };
        let block = self.block(Some("for"))?;

        Ok(Node::For { var,
                       start: Box::new(start),
                       end: Box::new(end),
                       step,
                       body: Box::new(block.body),
                       suppress_result: block.multi_line,
                       span: keyword.span.to(&block.close.span) })
    }

    /// Grammar: `whileExpr := 'while' expr block`
    pub(in crate::interpreter::parser) fn while_expr(&mut self) -> ParseResult<Node> {
        let keyword = self.advance();
        let condition = self.expr()?;
        let block = self.block(Some("while"))?;

        Ok(Node::While { condition:       Box::new(condition),
                         body:            Box::new(block.body),
                         suppress_result: block.multi_line,
                         span:            keyword.span.to(&block.close.span), })
    }

    /// Parses a function definition.
    ///
    /// Without `->` the function is statement-form and its calls return null;
    /// that form must be named. Anonymous functions always need `->`.
    ///
    /// Grammar: `funcDef := 'fun' IDENT? '(' (IDENT (',' IDENT)*)? ')' '->'? block`
    pub(in crate::interpreter::parser) fn fun_def(&mut self) -> ParseResult<Node> {
        let keyword = self.advance();
        let name = match &self.current().kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Some(name.clone())
            },
            _ => None,
        };

        let open = if name.is_some() {
            "'('"
        } else {
            "identifier or '('"
        };
        self.expect(&TokenKind::LParen, open)?;
        let (params, _) = self.comma_separated(Self::identifier, &TokenKind::RParen, "identifier")?;

        let returns_value = self.eat(&TokenKind::Arrow).is_some();
        if !returns_value && name.is_none() {
            return Err(self.error("'->' after anonymous function"));
        }

        let block = self.block(None)?;
        let def = FunctionDef { name,
                                params,
                                body: block.body,
                                suppress_result: !returns_value };

        Ok(Node::FunctionDef { def:  Rc::new(def),
                               span: keyword.span.to(&block.close.span), })
    }
}
