//! Recursive-descent parser for Simplex.
//!
//! Split by concern across sibling files
//! (`parser/{types,expressions,literals,definitions}`): this module holds
//! the token-stream plumbing shared by all of them.

mod definitions;
mod expressions;
mod literals;
mod types;

use crate::ast::Module;
use crate::error::{ParseError, ParseErrors, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::Span;
use crate::token::Token;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<SpannedToken<'a>>,
    errors: ParseErrors,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: None,
            errors: ParseErrors::new(),
        };
        parser.current = Self::pull(&mut parser.lexer, &mut parser.errors);
        parser
    }

    fn pull(
        lexer: &mut Lexer<'a>,
        errors: &mut ParseErrors,
    ) -> Option<SpannedToken<'a>> {
        loop {
            match lexer.next_token()? {
                Ok(tok) => return Some(tok),
                Err(e) => errors.push(e),
            }
        }
    }

    fn advance(&mut self) -> Option<SpannedToken<'a>> {
        let next = Self::pull(&mut self.lexer, &mut self.errors);
        std::mem::replace(&mut self.current, next)
    }

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref().map(|t| &t.token)
    }

    fn peek_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|t| t.span)
            .unwrap_or_else(Span::empty)
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> ParseResult<SpannedToken<'a>> {
        if self.at(&token) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<(String, Span)> {
        if self.at(&Token::Identifier) {
            let tok = self.advance().unwrap();
            Ok((tok.text.to_string(), tok.span))
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(tok) => ParseError::unexpected_token(tok.text, expected, tok.span),
            None => ParseError::unexpected_eof(expected, self.peek_span()),
        }
    }

    /// Skip tokens until a likely statement/definition boundary, so a single
    /// syntax error doesn't prevent reporting the rest: errors collect in a
    /// sink; a parse error still aborts compilation, but every error found
    /// is reported.
    fn resynchronize(&mut self) {
        loop {
            match self.peek() {
                None
                | Some(Token::KwLet)
                | Some(Token::KwFun)
                | Some(Token::KwData)
                | Some(Token::KwMeth)
                | Some(Token::KwImport)
                | Some(Token::KwProduce)
                | Some(Token::RBrace) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    pub fn into_errors(self) -> ParseErrors {
        self.errors
    }

    fn errors_mut(&mut self) -> &mut ParseErrors {
        &mut self.errors
    }
}

/// Parse a full module (imports, definitions, products), collecting every
/// syntax error found rather than stopping at the first one.
pub fn parse_module(source: &str) -> Result<Module, ParseErrors> {
    let mut parser = Parser::new(source);
    let module = parser.parse_module_inner();
    let mut errors = parser.errors;
    match module {
        Ok(m) if errors.is_empty() => Ok(m),
        Ok(_) => Err(errors),
        Err(e) => {
            errors.push(e);
            Err(errors)
        }
    }
}
