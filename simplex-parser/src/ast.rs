//! The Simplex abstract syntax tree.
//!
//! Every node carries a [`Span`]. The tree is immutable once built: the
//! parser constructs it bottom-up and later passes (analyzer, evaluator)
//! never mutate it.

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub imports: Vec<Import>,
    pub definitions: Vec<Definition>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
    pub scope: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub body: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Let(LetDef),
    Fun(FunDef),
    Data(DataDef),
    Meth(MethDef),
}

impl Definition {
    pub fn span(&self) -> Span {
        match self {
            Definition::Let(d) => d.span,
            Definition::Fun(d) => d.span,
            Definition::Data(d) => d.span,
            Definition::Meth(d) => d.span,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Definition::Let(d) => &d.name,
            Definition::Fun(d) => &d.name,
            Definition::Data(d) => &d.name,
            Definition::Meth(d) => &d.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetDef {
    pub name: String,
    pub declared_type: Option<TypeExpr>,
    pub init: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataDef {
    pub name: String,
    pub fields: Vec<DataField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethDef {
    pub target: TypeExpr,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: Box<Expr>,
    pub span: Span,
}

/// A type expression as written in source (`Int`, `[Int]`, `(Int,Float):Solid`,
/// `Int->(Int):Int`)
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Simple(String, Span),
    Vector(Box<TypeExpr>, Span),
    Function(Vec<TypeExpr>, Box<TypeExpr>, Span),
    Method(Box<TypeExpr>, Vec<TypeExpr>, Box<TypeExpr>, Span),
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Simple(_, s)
            | TypeExpr::Vector(_, s)
            | TypeExpr::Function(_, _, s)
            | TypeExpr::Method(_, _, _, s) => *s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinOp {
    /// The method name this operator desugars to. Comparison
    /// operators all dispatch to `compare` and are decided by the sign of
    /// the returned integer at evaluation time.
    pub fn method_name(self) -> &'static str {
        match self {
            BinOp::Add => "plus",
            BinOp::Sub => "minus",
            BinOp::Mul => "times",
            BinOp::Div => "div",
            BinOp::Mod => "mod",
            BinOp::Pow => "pow",
            BinOp::Eq => "eq",
            BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => "compare",
            BinOp::And | BinOp::Or => unreachable!("and/or short-circuit, never dispatched"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaDef {
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    Variable(String, Span),
    ScopedRef(String, String, Span),
    VectorLit(Vec<Expr>, Span),
    RecordConstruct(String, Vec<Expr>, Span),
    FieldAccess(Box<Expr>, String, Span),
    FieldUpdate(Box<Expr>, String, Box<Expr>, Span),
    Index(Box<Expr>, Box<Expr>, Span),
    IndexUpdate(Box<Expr>, Box<Expr>, Box<Expr>, Span),
    Call(Box<Expr>, Vec<Expr>, Span),
    MethodCall(Box<Expr>, String, Vec<Expr>, Span),
    Unary(UnOp, Box<Expr>, Span),
    Binary(BinOp, Box<Expr>, Box<Expr>, Span),
    Let(String, Option<TypeExpr>, Box<Expr>, Span),
    If(Vec<(Expr, Expr)>, Option<Box<Expr>>, Span),
    For(String, Box<Expr>, Box<Expr>, Span),
    While(Box<Expr>, Box<Expr>, Span),
    Block(Vec<Expr>, Span),
    Lambda(LambdaDef, Span),
    Assign(String, Box<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, s)
            | Expr::Variable(_, s)
            | Expr::ScopedRef(_, _, s)
            | Expr::VectorLit(_, s)
            | Expr::RecordConstruct(_, _, s)
            | Expr::FieldAccess(_, _, s)
            | Expr::FieldUpdate(_, _, _, s)
            | Expr::Index(_, _, s)
            | Expr::IndexUpdate(_, _, _, s)
            | Expr::Call(_, _, s)
            | Expr::MethodCall(_, _, _, s)
            | Expr::Unary(_, _, s)
            | Expr::Binary(_, _, _, s)
            | Expr::Let(_, _, _, s)
            | Expr::If(_, _, s)
            | Expr::For(_, _, _, s)
            | Expr::While(_, _, s)
            | Expr::Block(_, s)
            | Expr::Lambda(_, s)
            | Expr::Assign(_, _, s) => *s,
        }
    }
}
