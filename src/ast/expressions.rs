use crate::{lexer::tokens::Token, Span};

use super::{ast::Node, types::StaticType};

#[derive(Debug, Clone)]
pub struct Identifier {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InfixExpr {
    pub left: Box<Node>,
    pub operator: Token,
    pub right: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Node>,
    pub span: Span,
}

/// How the bracket part of an array literal was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySize {
    /// `[N]T`
    Fixed(usize),
    /// `[...]T`
    Inferred,
    /// `[]T`
    Slice,
    /// `[a, b, c]` with no element type written
    Bare,
}

#[derive(Debug, Clone)]
pub struct ArrayExpr {
    /// `None` for a bare list whose first element only gets a type once
    /// names are resolved (`[a, b]`).
    pub element_type: Option<StaticType>,
    pub size: ArraySize,
    /// `None` when the literal has no braces at all (`[5]int`), which is not
    /// the same as an empty list (`[5]int{}`).
    pub elements: Option<Vec<Node>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub collection: Box<Node>,
    pub index: Box<Node>,
    pub span: Span,
}
