use crate::Span;

use super::{ast::Node, types::StaticType};

#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Node>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CodeBlock {
    pub body: Vec<Node>,
    pub span: Span,
}

/// A `var`/`const`/`:=` binding, or a parenthesised group of them.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub is_constant: bool,
    /// Type written in the source; always wins over inference.
    pub explicit_type: Option<StaticType>,
    /// Type known at parse time (explicit, literal kind or array element kind).
    /// `None` means it is resolved against the scope chain during emission.
    pub inferred_type: Option<StaticType>,
    /// `None` is the "no value" marker.
    pub value: Option<Box<Node>>,
    /// Siblings of a grouped declaration, in source order.
    pub group: Vec<Declaration>,
    pub is_group: bool,
    pub span: Span,
}

impl Declaration {
    /// The type the declaration carries before any scope lookup.
    pub fn known_type(&self) -> Option<&StaticType> {
        self.explicit_type.as_ref().or(self.inferred_type.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub name: String,
    pub value: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Box<Node>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfElse {
    pub condition: Box<Node>,
    pub consequence: CodeBlock,
    pub alternative: Option<CodeBlock>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub param_type: StaticType,
    pub variadic: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<StaticType>,
    pub body: CodeBlock,
    pub span: Span,
}

impl Function {
    /// Return type, with a missing annotation meaning "no type".
    pub fn resolved_return_type(&self) -> StaticType {
        self.return_type.clone().unwrap_or(StaticType::NoType)
    }
}
