//! Top-level module parsing: imports, `let`/`fun`/`data`/`meth` definitions,
//! and `produce` blocks.

use crate::ast::{
    DataDef, DataField, Definition, FunDef, Import, LetDef, MethDef, Module, Product,
};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_module_inner(&mut self) -> ParseResult<Module> {
        let mut imports = Vec::new();
        let mut definitions = Vec::new();
        let mut products = Vec::new();

        while self.peek().is_some() {
            let result = match self.peek() {
                Some(Token::KwImport) => self.parse_import().map(|i| {
                    imports.push(i);
                }),
                Some(Token::KwLet) => self.parse_top_level_let().map(|d| {
                    definitions.push(Definition::Let(d));
                }),
                Some(Token::KwFun) => self.parse_fun().map(|d| {
                    definitions.push(Definition::Fun(d));
                }),
                Some(Token::KwData) => self.parse_data().map(|d| {
                    definitions.push(Definition::Data(d));
                }),
                Some(Token::KwMeth) => self.parse_meth().map(|d| {
                    definitions.push(Definition::Meth(d));
                }),
                Some(Token::KwProduce) => self.parse_produce().map(|p| {
                    products.push(p);
                }),
                _ => Err(self.unexpected("'import', 'let', 'fun', 'data', 'meth', or 'produce'")),
            };
            if let Err(e) = result {
                self.errors_mut().push(e);
                self.resynchronize();
            }
        }

        Ok(Module {
            imports,
            definitions,
            products,
        })
    }

    fn parse_import(&mut self) -> ParseResult<Import> {
        let start = self.expect(Token::KwImport, "'import'")?.span;
        let path_tok = self.expect(Token::StringLiteral, "a quoted library path")?;
        let path = super::literals::parse_string(path_tok.text, path_tok.span)?;
        self.expect(Token::KwAs, "'as'")?;
        let (scope, scope_span) = self.expect_identifier("a scope name")?;
        Ok(Import {
            path,
            scope,
            span: start.merge(&scope_span),
        })
    }

    fn parse_top_level_let(&mut self) -> ParseResult<LetDef> {
        let expr = self.parse_let_expr()?;
        match expr {
            crate::ast::Expr::Let(name, declared_type, init, span) => Ok(LetDef {
                name,
                declared_type,
                init: *init,
                span,
            }),
            other => unreachable!("parse_let_expr_public only returns Expr::Let, got {other:?}"),
        }
    }

    fn parse_fun(&mut self) -> ParseResult<FunDef> {
        let start = self.expect(Token::KwFun, "'fun'")?.span;
        let (name, _) = self.expect_identifier("a function name")?;
        self.expect(Token::LParen, "'(' after the function name")?;
        let params = self.parse_param_list()?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::Colon, "':' before the return type")?;
        let return_type = self.parse_type()?;
        let body = self.parse_block()?;
        let span = start.merge(&body.span());
        Ok(FunDef {
            name,
            params,
            return_type,
            body: Box::new(body),
            span,
        })
    }

    /// Fields are whitespace-separated with no commas, e.g. `data P{x:Int y:Int}`.
    fn parse_data(&mut self) -> ParseResult<DataDef> {
        let start = self.expect(Token::KwData, "'data'")?.span;
        let (name, _) = self.expect_identifier("a data type name")?;
        self.expect(Token::LBrace, "'{' after the data type name")?;
        let mut fields = Vec::new();
        while !self.at(&Token::RBrace) {
            let (fname, fstart) = self.expect_identifier("a field name")?;
            self.expect(Token::Colon, "':' before the field type")?;
            let ty = self.parse_type()?;
            let fspan = fstart.merge(&ty.span());
            fields.push(DataField {
                name: fname,
                ty,
                span: fspan,
            });
        }
        let close = self.expect(Token::RBrace, "'}'")?.span;
        Ok(DataDef {
            name,
            fields,
            span: start.merge(&close),
        })
    }

    fn parse_meth(&mut self) -> ParseResult<MethDef> {
        let start = self.expect(Token::KwMeth, "'meth'")?.span;
        let target = self.parse_type()?;
        let (name, _) = self.expect_identifier("a method name")?;
        self.expect(Token::LParen, "'(' after the method name")?;
        let params = self.parse_param_list()?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::Colon, "':' before the return type")?;
        let return_type = self.parse_type()?;
        let body = self.parse_block()?;
        let span = start.merge(&body.span());
        Ok(MethDef {
            target,
            name,
            params,
            return_type,
            body: Box::new(body),
            span,
        })
    }

    fn parse_produce(&mut self) -> ParseResult<Product> {
        let start = self.expect(Token::KwProduce, "'produce'")?.span;
        self.expect(Token::LParen, "'(' after 'produce'")?;
        let name_tok = self.expect(Token::StringLiteral, "a quoted product name")?;
        let name = super::literals::parse_string(name_tok.text, name_tok.span)?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::LBrace, "'{' to start the product body")?;
        let mut body = Vec::new();
        while !self.at(&Token::RBrace) {
            body.push(self.parse_expr()?);
        }
        let close = self.expect(Token::RBrace, "'}'")?.span;
        Ok(Product {
            name,
            body,
            span: start.merge(&close),
        })
    }
}
