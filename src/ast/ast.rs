use std::fmt::Display;

use crate::{
    lexer::tokens::TokenKind,
    parser::lookups::{infix_binding_power, BindingPower},
    Span,
};

use super::{
    expressions::{
        ArrayExpr, ArraySize, BooleanLiteral, CallExpr, Identifier, IndexExpr, InfixExpr,
        IntegerLiteral, PrefixExpr, StringLiteral,
    },
    statements::{
        Assignment, CodeBlock, Declaration, ExpressionStmt, Function, IfElse, Program, ReturnStmt,
    },
    types::StaticType,
};

/// Every node the parser can produce. Consumers match on it exhaustively, so
/// adding a variant forces every pass to decide how to handle it.
#[derive(Debug, Clone)]
pub enum Node {
    Program(Program),
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    Declaration(Declaration),
    Assignment(Assignment),
    Return(ReturnStmt),
    ExpressionStatement(ExpressionStmt),
    CodeBlock(CodeBlock),
    IfElse(IfElse),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Function(Function),
    FunctionCall(CallExpr),
    Array(ArrayExpr),
    Index(IndexExpr),
}

/// Operators whose result is a bool whatever their operands are.
pub fn is_boolean_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
    )
}

/// Whether `child` must be parenthesised when printed as an operand of an
/// operator binding with `parent`. Chains are left associative.
pub fn needs_parens(child: &Node, parent: BindingPower, right_side: bool) -> bool {
    let child_bp = child.precedence();
    child_bp < parent || (right_side && child_bp == parent)
}

impl Node {
    pub fn get_span(&self) -> &Span {
        match self {
            Node::Program(node) => &node.span,
            Node::Identifier(node) => &node.span,
            Node::IntegerLiteral(node) => &node.span,
            Node::StringLiteral(node) => &node.span,
            Node::BooleanLiteral(node) => &node.span,
            Node::Declaration(node) => &node.span,
            Node::Assignment(node) => &node.span,
            Node::Return(node) => &node.span,
            Node::ExpressionStatement(node) => &node.span,
            Node::CodeBlock(node) => &node.span,
            Node::IfElse(node) => &node.span,
            Node::Prefix(node) => &node.span,
            Node::Infix(node) => &node.span,
            Node::Function(node) => &node.span,
            Node::FunctionCall(node) => &node.span,
            Node::Array(node) => &node.span,
            Node::Index(node) => &node.span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Program(_) => "Program",
            Node::Identifier(_) => "Identifier",
            Node::IntegerLiteral(_) => "IntegerLiteral",
            Node::StringLiteral(_) => "StringLiteral",
            Node::BooleanLiteral(_) => "BooleanLiteral",
            Node::Declaration(_) => "Declaration",
            Node::Assignment(_) => "Assignment",
            Node::Return(_) => "Return",
            Node::ExpressionStatement(_) => "ExpressionStatement",
            Node::CodeBlock(_) => "CodeBlock",
            Node::IfElse(_) => "IfElse",
            Node::Prefix(_) => "Prefix",
            Node::Infix(_) => "Infix",
            Node::Function(_) => "Function",
            Node::FunctionCall(_) => "FunctionCall",
            Node::Array(_) => "Array",
            Node::Index(_) => "Index",
        }
    }

    /// The static type a node carries on its own, without consulting any scope.
    pub fn static_type(&self) -> Option<StaticType> {
        match self {
            Node::IntegerLiteral(_) => Some(StaticType::Integer),
            Node::StringLiteral(_) => Some(StaticType::String),
            Node::BooleanLiteral(_) => Some(StaticType::Bool),
            Node::Array(array) => array.element_type.clone().map(StaticType::array_of),
            Node::Declaration(declaration) => declaration.known_type().cloned(),
            Node::Function(function) => Some(function.resolved_return_type()),
            Node::Prefix(prefix) if is_boolean_operator(prefix.operator.kind) => {
                Some(StaticType::Bool)
            }
            Node::Infix(infix) if is_boolean_operator(infix.operator.kind) => {
                Some(StaticType::Bool)
            }
            _ => None,
        }
    }

    pub fn precedence(&self) -> BindingPower {
        match self {
            Node::Infix(infix) => {
                infix_binding_power(infix.operator.kind).unwrap_or(BindingPower::Default)
            }
            Node::Prefix(_) => BindingPower::Prefix,
            _ => BindingPower::Primary,
        }
    }

    /// Structural dump of the tree, used to compare parses.
    pub fn dump(&self) -> String {
        match self {
            Node::Program(program) => join_dumps(&program.body, "\n"),
            Node::Identifier(identifier) => format!("Identifier({})", identifier.value),
            Node::IntegerLiteral(integer) => format!("Integer({})", integer.value),
            Node::StringLiteral(string) => format!("String({})", string.value),
            Node::BooleanLiteral(boolean) => format!("Boolean({})", boolean.value),
            Node::Declaration(declaration) => dump_declaration(declaration),
            Node::Assignment(assignment) => format!(
                "Assignment(Identifier({}) = {})",
                assignment.name,
                assignment.value.dump()
            ),
            Node::Return(ret) => match &ret.value {
                Some(value) => format!("ReturnStatement({})", value.dump()),
                None => String::from("ReturnStatement(EMPTY)"),
            },
            Node::ExpressionStatement(stmt) => {
                format!("ExpressionStatement({})", stmt.expression.dump())
            }
            Node::CodeBlock(block) => join_dumps(&block.body, ", "),
            Node::IfElse(if_else) => format!(
                "IfStatement(Condition({}) Consequence({}) Alternative({}))",
                if_else.condition.dump(),
                join_dumps(&if_else.consequence.body, ", "),
                if_else
                    .alternative
                    .as_ref()
                    .map(|block| join_dumps(&block.body, ", "))
                    .unwrap_or_default()
            ),
            Node::Prefix(prefix) => format!("({}{})", prefix.operator.value, prefix.right.dump()),
            Node::Infix(infix) => format!(
                "({} {} {})",
                infix.left.dump(),
                infix.operator.value,
                infix.right.dump()
            ),
            Node::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| {
                        if parameter.variadic {
                            let element = parameter
                                .param_type
                                .element_type()
                                .cloned()
                                .unwrap_or(StaticType::NoType);
                            format!("{}: ...{}", parameter.name, element)
                        } else {
                            format!("{}: {}", parameter.name, parameter.param_type)
                        }
                    })
                    .collect::<Vec<String>>()
                    .join(", ");

                format!(
                    "Function(Name({}) Params({}) Returns({}) Body({}))",
                    function.name.clone().unwrap_or_default(),
                    parameters,
                    function
                        .return_type
                        .as_ref()
                        .map(|ty| ty.to_string())
                        .unwrap_or_default(),
                    join_dumps(&function.body.body, ", ")
                )
            }
            Node::FunctionCall(call) => format!(
                "FunctionCall(Identifier({})({}))",
                call.callee,
                join_dumps(&call.arguments, ", ")
            ),
            Node::Array(array) => match &array.elements {
                Some(elements) => format!("Array([{}])", join_dumps(elements, ", ")),
                None => String::from("Array(EMPTY)"),
            },
            Node::Index(index) => format!(
                "IndexExpression(Left:({}) Right: [{}])",
                index.collection.dump(),
                index.index.dump()
            ),
        }
    }
}

fn join_dumps(nodes: &[Node], separator: &str) -> String {
    nodes
        .iter()
        .map(Node::dump)
        .collect::<Vec<String>>()
        .join(separator)
}

fn dump_declaration(declaration: &Declaration) -> String {
    let keyword = if declaration.is_constant { "Const" } else { "Var" };

    if declaration.is_group {
        let children = declaration
            .group
            .iter()
            .map(dump_declaration)
            .collect::<Vec<String>>()
            .join(", ");
        return format!("{}Group({})", keyword, children);
    }

    let mut dump = format!("{}Node(Identifier({})", keyword, declaration.name);
    if let Some(explicit_type) = &declaration.explicit_type {
        dump.push_str(&format!(": {}", explicit_type));
    }
    if let Some(value) = &declaration.value {
        dump.push_str(&format!(" = {}", value.dump()));
    }
    dump.push(')');
    dump
}

/// Source text of an expression. Statements print their structural dump.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Identifier(identifier) => write!(f, "{}", identifier.value),
            Node::IntegerLiteral(integer) => write!(f, "{}", integer.value),
            Node::StringLiteral(string) => write!(f, "\"{}\"", string.value),
            Node::BooleanLiteral(boolean) => write!(f, "{}", boolean.value),
            Node::Prefix(prefix) => {
                if needs_parens(&prefix.right, BindingPower::Prefix, true) {
                    write!(f, "{}({})", prefix.operator.value, prefix.right)
                } else {
                    write!(f, "{}{}", prefix.operator.value, prefix.right)
                }
            }
            Node::Infix(infix) => {
                let bp = self.precedence();
                if needs_parens(&infix.left, bp, false) {
                    write!(f, "({})", infix.left)?;
                } else {
                    write!(f, "{}", infix.left)?;
                }
                write!(f, " {} ", infix.operator.value)?;
                if needs_parens(&infix.right, bp, true) {
                    write!(f, "({})", infix.right)
                } else {
                    write!(f, "{}", infix.right)
                }
            }
            Node::FunctionCall(call) => {
                let arguments = call
                    .arguments
                    .iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<String>>()
                    .join(",");
                write!(f, "{}({})", call.callee, arguments)
            }
            Node::Array(array) => {
                if let Some(element_type) = &array.element_type {
                    match array.size {
                        ArraySize::Fixed(size) => write!(f, "[{}]{}", size, element_type)?,
                        ArraySize::Inferred => write!(f, "[...]{}", element_type)?,
                        ArraySize::Slice => write!(f, "[]{}", element_type)?,
                        ArraySize::Bare => {}
                    }
                }
                let elements = array.elements.as_ref().map(|elements| {
                    elements
                        .iter()
                        .map(|element| element.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                });
                match (array.size, elements) {
                    (ArraySize::Bare, elements) => write!(f, "[{}]", elements.unwrap_or_default()),
                    (_, Some(elements)) => write!(f, "{{{}}}", elements),
                    (_, None) => Ok(()),
                }
            }
            Node::Index(index) => {
                if needs_parens(&index.collection, BindingPower::Index, false) {
                    write!(f, "({})[{}]", index.collection, index.index)
                } else {
                    write!(f, "{}[{}]", index.collection, index.index)
                }
            }
            _ => write!(f, "{}", self.dump()),
        }
    }
}
