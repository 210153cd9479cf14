use crate::interpreter::{
    lexer::{Token, TokenKind},
    parser::core::{Attempt, ParseResult, Parser},
};

impl<'t> Parser<'t> {
    /// Consumes a token of kind `kind`, or fails with `Expected <expected>`.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 kind: &TokenKind,
                                                 expected: &str)
                                                 -> ParseResult<&'t Token> {
        self.eat(kind).ok_or_else(|| self.error(expected))
    }

    /// Consumes an identifier and returns its name.
    pub(in crate::interpreter::parser) fn identifier(&mut self) -> ParseResult<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name.clone())
            },
            _ => Err(self.error("identifier")),
        }
    }

    /// Parses a comma-separated list of items up to and including `closing`.
    ///
    /// The opening bracket must already be consumed. An immediately found
    /// closing token produces an empty list.
    ///
    /// Grammar (simplified): `list := (item (',' item)*)? closing`
    ///
    /// # Parameters
    /// - `parse_item`: Parses one element.
    /// - `closing`: The token that terminates the list, such as `)` or `]`.
    /// - `item_start`: Tokens that may start an item, for the error message
    ///   when neither an item nor `closing` is found.
    ///
    /// # Returns
    /// The parsed items and the closing token.
    pub(in crate::interpreter::parser) fn comma_separated<T>(&mut self,
                                                             parse_item: fn(&mut Self)
                                                                         -> ParseResult<T>,
                                                             closing: &TokenKind,
                                                             item_start: &str)
                                                             -> ParseResult<(Vec<T>, &'t Token)>
    {
        let mut items = Vec::new();
        if let Some(close) = self.eat(closing) {
            return Ok((items, close));
        }

        loop {
            match self.attempt(parse_item) {
                Attempt::Parsed(item) => items.push(item),
                Attempt::Failed { consumed: 0, .. } if items.is_empty() => {
                    return Err(self.error(&format!("'{closing}', {item_start}")));
                },
                Attempt::Failed { error, .. } => return Err(error),
            }

            if self.eat(&TokenKind::Comma).is_some() {
                continue;
            }
            if let Some(close) = self.eat(closing) {
                return Ok((items, close));
            }
            return Err(self.error(&format!("',' or '{closing}'")));
        }
    }
}
