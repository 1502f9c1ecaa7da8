use std::io::Write;

use crate::{
    ast::{
        ast::{needs_parens, Node},
        types::StaticType,
    },
    errors::errors::{Error, ErrorImpl},
    parser::lookups::BindingPower,
};

use super::compiler::{builtin_target, Compiler};

/// TypeScript text of an expression.
pub fn gen_expression<W: Write>(compiler: &Compiler<W>, expr: &Node) -> Result<String, Error> {
    match expr {
        Node::Identifier(identifier) => Ok(builtin_target(&identifier.value)
            .map(String::from)
            .unwrap_or_else(|| identifier.value.clone())),
        Node::IntegerLiteral(_) | Node::StringLiteral(_) | Node::BooleanLiteral(_) => {
            Ok(expr.to_string())
        }
        Node::Prefix(prefix) => {
            let right = gen_operand(compiler, &prefix.right, BindingPower::Prefix, true)?;
            Ok(format!("{}{}", prefix.operator.value, right))
        }
        Node::Infix(infix) => {
            let bp = expr.precedence();
            let left = gen_operand(compiler, &infix.left, bp, false)?;
            let right = gen_operand(compiler, &infix.right, bp, true)?;
            Ok(format!("{} {} {}", left, infix.operator.value, right))
        }
        Node::FunctionCall(call) => {
            let arguments = call
                .arguments
                .iter()
                .map(|argument| gen_expression(compiler, argument))
                .collect::<Result<Vec<String>, Error>>()?;

            if call.callee == "len" && arguments.len() == 1 {
                let collection = gen_operand(compiler, &call.arguments[0], BindingPower::Call, false)?;
                return Ok(format!("{}.length", collection));
            }

            let callee = builtin_target(&call.callee).unwrap_or(call.callee.as_str());
            Ok(format!("{}({})", callee, arguments.join(",")))
        }
        Node::Array(array) => {
            let elements = array
                .elements
                .iter()
                .flatten()
                .map(|element| gen_expression(compiler, element))
                .collect::<Result<Vec<String>, Error>>()?;
            Ok(format!("[{}]", elements.join(", ")))
        }
        Node::Index(index) => {
            let collection = gen_operand(compiler, &index.collection, BindingPower::Index, false)?;
            let position = gen_expression(compiler, &index.index)?;
            Ok(format!("{}[{}]", collection, position))
        }
        _ => Err(unsupported(expr)),
    }
}

fn gen_operand<W: Write>(
    compiler: &Compiler<W>,
    operand: &Node,
    parent: BindingPower,
    right_side: bool,
) -> Result<String, Error> {
    let text = gen_expression(compiler, operand)?;
    if needs_parens(operand, parent, right_side) {
        Ok(format!("({})", text))
    } else {
        Ok(text)
    }
}

pub fn unsupported(node: &Node) -> Error {
    Error::new(
        ErrorImpl::UnsupportedNode {
            node: String::from(node.kind_name()),
        },
        node.get_span().start.clone(),
    )
}

/// Static type of an expression, consulting the scope chain for names.
///
/// Arithmetic takes the type of its left operand.
pub fn resolve_type<W: Write>(compiler: &Compiler<W>, expr: &Node) -> Result<StaticType, Error> {
    if let Some(static_type) = expr.static_type() {
        return Ok(static_type);
    }

    match expr {
        Node::Identifier(identifier) => lookup(compiler, &identifier.value, expr),
        Node::FunctionCall(call) => lookup(compiler, &call.callee, expr),
        Node::Infix(infix) => resolve_type(compiler, &infix.left),
        Node::Prefix(prefix) => resolve_type(compiler, &prefix.right),
        Node::Array(array) => match array.elements.iter().flatten().next() {
            Some(first) => Ok(StaticType::array_of(resolve_type(compiler, first)?)),
            None => Err(unsupported(expr)),
        },
        Node::Index(index) => {
            let collection = resolve_type(compiler, &index.collection)?;
            match collection.element_type() {
                Some(element) => Ok(element.clone()),
                None => Err(Error::new(
                    ErrorImpl::NotIndexable {
                        type_: collection.to_string(),
                    },
                    index.span.start.clone(),
                )),
            }
        }
        _ => Err(unsupported(expr)),
    }
}

fn lookup<W: Write>(compiler: &Compiler<W>, name: &str, node: &Node) -> Result<StaticType, Error> {
    match compiler.scopes.resolve(name) {
        Some(symbol) => Ok(symbol.static_type.clone()),
        None => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: String::from(name),
            },
            node.get_span().start.clone(),
        )),
    }
}
