//! Expression parsing: precedence climbing over binary operators, postfix
//! chains (`.field`, `->method(...)`, `(...)`, `[...]`), and primaries.

use crate::ast::{BinOp, Expr, LambdaDef, Literal, Param, UnOp};
use crate::error::{ParseError, ParseResult};
use crate::token::Token;

use super::literals::{parse_float, parse_int, parse_string};
use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        if self.at(&Token::KwLet) {
            return self.parse_let_expr();
        }
        self.parse_assign_or_or()
    }

    pub(super) fn parse_let_expr(&mut self) -> ParseResult<Expr> {
        let start = self.expect(Token::KwLet, "'let'")?.span;
        let (name, _) = self.expect_identifier("a binding name")?;
        let declared_type = if self.eat(&Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(Token::Eq, "'=' after the let binding name")?;
        let init = self.parse_expr()?;
        let span = start.merge(&init.span());
        Ok(Expr::Let(name, declared_type, Box::new(init), span))
    }

    /// Parses an or-expression, then checks whether it is the target of a
    /// `:=` assignment. The assignment target's shape decides whether it
    /// desugars to a plain [`Expr::Assign`], [`Expr::FieldUpdate`], or
    /// [`Expr::IndexUpdate`] node.
    fn parse_assign_or_or(&mut self) -> ParseResult<Expr> {
        let target = self.parse_or()?;
        if self.eat(&Token::ColonEq) {
            let value = self.parse_expr()?;
            let span = target.span().merge(&value.span());
            return match target {
                Expr::Variable(name, _) => Ok(Expr::Assign(name, Box::new(value), span)),
                Expr::FieldAccess(receiver, field, _) => {
                    Ok(Expr::FieldUpdate(receiver, field, Box::new(value), span))
                }
                Expr::Index(receiver, index, _) => {
                    Ok(Expr::IndexUpdate(receiver, index, Box::new(value), span))
                }
                other => Err(ParseError::invalid_syntax(
                    "the left side of ':=' must be a variable, field, or index",
                    other.span(),
                )),
            };
        }
        Ok(target)
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_and()?;
        while self.eat(&Token::KwOr) {
            let rhs = self.parse_and()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(BinOp::Or, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_comparison()?;
        while self.eat(&Token::KwAnd) {
            let rhs = self.parse_comparison()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(BinOp::And, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinOp::Eq,
                Some(Token::NotEq) => BinOp::NotEq,
                Some(Token::Lt) => BinOp::Lt,
                Some(Token::LtEq) => BinOp::LtEq,
                Some(Token::Gt) => BinOp::Gt,
                Some(Token::GtEq) => BinOp::GtEq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_power()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_power()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    /// `^` is right-associative: `2^3^2` parses as `2^(3^2)`.
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_unary()?;
        if self.eat(&Token::Caret) {
            let rhs = self.parse_power()?;
            let span = lhs.span().merge(&rhs.span());
            return Ok(Expr::Binary(BinOp::Pow, Box::new(lhs), Box::new(rhs), span));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.at(&Token::Minus) {
            let start = self.advance().unwrap().span;
            let operand = self.parse_unary()?;
            let span = start.merge(&operand.span());
            return Ok(Expr::Unary(UnOp::Neg, Box::new(operand), span));
        }
        if self.at(&Token::KwNot) {
            let start = self.advance().unwrap().span;
            let operand = self.parse_unary()?;
            let span = start.merge(&operand.span());
            return Ok(Expr::Unary(UnOp::Not, Box::new(operand), span));
        }
        self.parse_postfix()
    }

    /// Parses a primary expression followed by any chain of `.field`,
    /// `->method(args)`, `(args)`, and `[index]` suffixes.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.advance();
                    let (field, fspan) = self.expect_identifier("a field name")?;
                    let span = expr.span().merge(&fspan);
                    expr = Expr::FieldAccess(Box::new(expr), field, span);
                }
                Some(Token::Arrow) => {
                    self.advance();
                    let (name, _) = self.expect_identifier("a method name")?;
                    self.expect(Token::LParen, "'(' after the method name")?;
                    let args = self.parse_arg_list()?;
                    let close = self.expect(Token::RParen, "')'")?.span;
                    let span = expr.span().merge(&close);
                    expr = Expr::MethodCall(Box::new(expr), name, args, span);
                }
                Some(Token::LParen) => {
                    self.advance();
                    let args = self.parse_arg_list()?;
                    let close = self.expect(Token::RParen, "')'")?.span;
                    let span = expr.span().merge(&close);
                    expr = Expr::Call(Box::new(expr), args, span);
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let close = self.expect(Token::RBracket, "']'")?.span;
                    let span = expr.span().merge(&close);
                    expr = Expr::Index(Box::new(expr), Box::new(index), span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_arg_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.at(&Token::RParen) {
            args.push(self.parse_expr()?);
            while self.eat(&Token::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek() {
            Some(Token::IntLiteral) => {
                let tok = self.advance().unwrap();
                let value = parse_int(tok.text, tok.span)?;
                Ok(Expr::Literal(Literal::Int(value), tok.span))
            }
            Some(Token::FloatLiteral) => {
                let tok = self.advance().unwrap();
                let value = parse_float(tok.text, tok.span)?;
                Ok(Expr::Literal(Literal::Float(value), tok.span))
            }
            Some(Token::StringLiteral) => {
                let tok = self.advance().unwrap();
                let value = parse_string(tok.text, tok.span)?;
                Ok(Expr::Literal(Literal::Str(value), tok.span))
            }
            Some(Token::True) => {
                let tok = self.advance().unwrap();
                Ok(Expr::Literal(Literal::Bool(true), tok.span))
            }
            Some(Token::False) => {
                let tok = self.advance().unwrap();
                Ok(Expr::Literal(Literal::Bool(false), tok.span))
            }
            Some(Token::KwNone) => {
                let tok = self.advance().unwrap();
                Ok(Expr::Literal(Literal::None, tok.span))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::LBracket) => self.parse_vector_literal(),
            Some(Token::Hash) => self.parse_record_construct(),
            Some(Token::KwIf) => self.parse_if(),
            Some(Token::KwFor) => self.parse_for(),
            Some(Token::KwWhile) => self.parse_while(),
            Some(Token::LBrace) => self.parse_block(),
            Some(Token::KwLambda) => self.parse_lambda(),
            Some(Token::Identifier) => self.parse_variable_or_scoped_ref(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_variable_or_scoped_ref(&mut self) -> ParseResult<Expr> {
        let (name, span) = self.expect_identifier("an identifier")?;
        if self.eat(&Token::DoubleColon) {
            let (member, mspan) = self.expect_identifier("a name after '::'")?;
            return Ok(Expr::ScopedRef(name, member, span.merge(&mspan)));
        }
        Ok(Expr::Variable(name, span))
    }

    fn parse_vector_literal(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::LBracket, "'['")?.span;
        let mut elements = Vec::new();
        if !self.at(&Token::RBracket) {
            elements.push(self.parse_expr()?);
            while self.eat(&Token::Comma) {
                elements.push(self.parse_expr()?);
            }
        }
        let close = self.expect(Token::RBracket, "']'")?.span;
        Ok(Expr::VectorLit(elements, open.merge(&close)))
    }

    fn parse_record_construct(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::Hash, "'#'")?.span;
        let (name, _) = self.expect_identifier("a data type name")?;
        self.expect(Token::LParen, "'(' after the data type name")?;
        let args = self.parse_arg_list()?;
        let close = self.expect(Token::RParen, "')'")?.span;
        Ok(Expr::RecordConstruct(name, args, open.merge(&close)))
    }

    fn parse_if(&mut self) -> ParseResult<Expr> {
        let start = self.expect(Token::KwIf, "'if'")?.span;
        let mut branches = Vec::new();
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        branches.push((cond, body));
        while self.at(&Token::KwElif) {
            self.advance();
            let cond = self.parse_expr()?;
            let body = self.parse_block()?;
            branches.push((cond, body));
        }
        let mut else_branch = None;
        let mut end = branches.last().unwrap().1.span();
        if self.eat(&Token::KwElse) {
            let body = self.parse_block()?;
            end = body.span();
            else_branch = Some(Box::new(body));
        }
        Ok(Expr::If(branches, else_branch, start.merge(&end)))
    }

    fn parse_for(&mut self) -> ParseResult<Expr> {
        let start = self.expect(Token::KwFor, "'for'")?.span;
        let (name, _) = self.expect_identifier("a loop variable name")?;
        self.expect(Token::KwIn, "'in'")?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(&body.span());
        Ok(Expr::For(name, Box::new(iterable), Box::new(body), span))
    }

    fn parse_while(&mut self) -> ParseResult<Expr> {
        let start = self.expect(Token::KwWhile, "'while'")?.span;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(&body.span());
        Ok(Expr::While(Box::new(cond), Box::new(body), span))
    }

    pub(super) fn parse_block(&mut self) -> ParseResult<Expr> {
        let open = self.expect(Token::LBrace, "'{'")?.span;
        let mut exprs = Vec::new();
        while !self.at(&Token::RBrace) {
            exprs.push(self.parse_expr()?);
        }
        let close = self.expect(Token::RBrace, "'}'")?.span;
        Ok(Expr::Block(exprs, open.merge(&close)))
    }

    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let start = self.expect(Token::KwLambda, "'lambda'")?.span;
        self.expect(Token::LParen, "'(' after 'lambda'")?;
        let params = self.parse_param_list()?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::Colon, "':' before the return type")?;
        let return_type = self.parse_type()?;
        let body = self.parse_block()?;
        let span = start.merge(&body.span());
        Ok(Expr::Lambda(
            LambdaDef {
                params,
                return_type,
                body: Box::new(body),
            },
            span,
        ))
    }

    pub(super) fn parse_param_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if !self.at(&Token::RParen) {
            params.push(self.parse_param()?);
            while self.eat(&Token::Comma) {
                params.push(self.parse_param()?);
            }
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let (name, start) = self.expect_identifier("a parameter name")?;
        self.expect(Token::Colon, "':' before the parameter type")?;
        let ty = self.parse_type()?;
        let span = start.merge(&ty.span());
        Ok(Param { name, ty, span })
    }
}

#[cfg(test)]
mod tests {
    use super::super::Parser;
    use crate::ast::{BinOp, Expr, Literal};

    fn parse(src: &str) -> Expr {
        let mut p = Parser::new(src);
        p.parse_expr().unwrap()
    }

    #[test]
    fn precedence_multiplies_before_adding() {
        match parse("1 + 2 * 3") {
            Expr::Binary(BinOp::Add, lhs, rhs, _) => {
                assert!(matches!(*lhs, Expr::Literal(Literal::Int(1), _)));
                assert!(matches!(*rhs, Expr::Binary(BinOp::Mul, _, _, _)));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        match parse("2 ^ 3 ^ 2") {
            Expr::Binary(BinOp::Pow, lhs, rhs, _) => {
                assert!(matches!(*lhs, Expr::Literal(Literal::Int(2), _)));
                assert!(matches!(*rhs, Expr::Binary(BinOp::Pow, _, _, _)));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn postfix_chain_builds_in_source_order() {
        match parse("a.b->c(1)[0]") {
            Expr::Index(inner, idx, _) => {
                assert!(matches!(*idx, Expr::Literal(Literal::Int(0), _)));
                assert!(matches!(*inner, Expr::MethodCall(_, ref name, _, _) if name == "c"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn colon_eq_on_field_access_becomes_field_update() {
        match parse("p.x := 5") {
            Expr::FieldUpdate(receiver, field, value, _) => {
                assert_eq!(field, "x");
                assert!(matches!(*receiver, Expr::Variable(ref n, _) if n == "p"));
                assert!(matches!(*value, Expr::Literal(Literal::Int(5), _)));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn scoped_reference_parses_double_colon() {
        assert!(matches!(parse("shapes::cube"), Expr::ScopedRef(ref a, ref b, _) if a == "shapes" && b == "cube"));
    }
}
