//! Token definitions for Simplex source code.

use logos::Logos;

/// Simplex keywords, punctuation, operators, and literal token kinds.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*?\*/")]
// `;` is an optional, purely cosmetic statement separator.
#[logos(skip r";")]
pub enum Token {
    // ==================== Keywords ====================
    #[token("let")]
    KwLet,
    #[token("fun")]
    KwFun,
    #[token("data")]
    KwData,
    #[token("meth")]
    KwMeth,
    #[token("import")]
    KwImport,
    #[token("as")]
    KwAs,
    #[token("produce")]
    KwProduce,
    #[token("for")]
    KwFor,
    #[token("in")]
    KwIn,
    #[token("while")]
    KwWhile,
    #[token("if")]
    KwIf,
    #[token("elif")]
    KwElif,
    #[token("else")]
    KwElse,
    #[token("lambda")]
    KwLambda,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("not")]
    KwNot,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("none")]
    KwNone,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token("::")]
    DoubleColon,
    #[token(":=")]
    ColonEq,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token("->")]
    Arrow,

    // ==================== Operators ====================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,

    // ==================== Literals ====================
    #[regex(r"[0-9][0-9_]*")]
    IntLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    // ==================== Identifiers ====================
    #[regex(r"[A-Za-z_][A-Za-z_0-9]*")]
    Identifier,

    Error,
}

impl Token {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::True
                | Token::False
                | Token::KwNone
                | Token::IntLiteral
                | Token::FloatLiteral
                | Token::StringLiteral
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Token::lexer(src).filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn basic_tokens() {
        let tokens = lex("fun c(r:Float):Int { r }");
        assert_eq!(
            tokens,
            vec![
                Token::KwFun,
                Token::Identifier,
                Token::LParen,
                Token::Identifier,
                Token::Colon,
                Token::Identifier,
                Token::RParen,
                Token::Colon,
                Token::Identifier,
                Token::LBrace,
                Token::Identifier,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = lex("// hi\n1 /* block */ 2");
        assert_eq!(tokens, vec![Token::IntLiteral, Token::IntLiteral]);
    }

    #[test]
    fn scope_and_assign_operators() {
        let tokens = lex("a::b := 3");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier,
                Token::DoubleColon,
                Token::Identifier,
                Token::ColonEq,
                Token::IntLiteral,
            ]
        );
    }
}
