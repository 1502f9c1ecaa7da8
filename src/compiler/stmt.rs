use std::io::Write;

use log::trace;

use crate::{
    ast::{
        ast::Node,
        statements::{Assignment, CodeBlock, Declaration, Function, IfElse},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    expr::{gen_expression, resolve_type, unsupported},
    scope::{Symbol, SymbolKind},
};

pub fn gen_statement<W: Write>(compiler: &mut Compiler<W>, statement: &Node) -> Result<(), Error> {
    trace!("emitting {}", statement.kind_name());

    match statement {
        Node::Declaration(declaration) if declaration.is_group => {
            for child in &declaration.group {
                gen_declaration(compiler, child)?;
            }
            Ok(())
        }
        Node::Declaration(declaration) => gen_declaration(compiler, declaration),
        Node::Assignment(assignment) => gen_assignment(compiler, assignment),
        Node::Return(ret) => match &ret.value {
            Some(value) => {
                let value = gen_expression(compiler, value)?;
                compiler.write_line(&format!("return {};", value))
            }
            None => compiler.write_line("return;"),
        },
        Node::ExpressionStatement(stmt) => {
            let expression = gen_expression(compiler, &stmt.expression)?;
            compiler.write_line(&format!("{};", expression))
        }
        Node::IfElse(if_else) => gen_if_else(compiler, if_else),
        Node::Function(function) => match &function.name {
            Some(name) => gen_function(compiler, function, name),
            None => Err(unsupported(statement)),
        },
        _ => Err(unsupported(statement)),
    }
}

fn gen_block<W: Write>(compiler: &mut Compiler<W>, block: &CodeBlock) -> Result<(), Error> {
    compiler.nested(|compiler| {
        for statement in &block.body {
            gen_statement(compiler, statement)?;
        }
        Ok(())
    })
}

fn gen_declaration<W: Write>(
    compiler: &mut Compiler<W>,
    declaration: &Declaration,
) -> Result<(), Error> {
    let misuse = |message: &str| {
        Error::new(
            ErrorImpl::ConstantMisuse {
                constant: declaration.name.clone(),
                message: String::from(message),
            },
            declaration.span.start.clone(),
        )
    };

    let value = declaration.value.as_deref();
    match value {
        Some(Node::Function(function)) => {
            return gen_function(compiler, function, &declaration.name);
        }
        Some(Node::FunctionCall(_)) if declaration.is_constant => {
            return Err(misuse("cannot be bound to a function call"));
        }
        Some(Node::Index(_)) if declaration.is_constant => {
            return Err(misuse("cannot be bound to an index expression"));
        }
        _ => {}
    }

    let static_type = match (declaration.known_type(), value) {
        (Some(known), _) => known.clone(),
        (None, Some(value)) => resolve_type(compiler, value)?,
        (None, None) => {
            return Err(Error::new(
                ErrorImpl::ExpectedExplicitValue {
                    variable: declaration.name.clone(),
                },
                declaration.span.start.clone(),
            ))
        }
    };

    let keyword = if declaration.is_constant { "const" } else { "let" };
    let mut line = format!(
        "{} {}: {}",
        keyword,
        declaration.name,
        static_type.target_name()
    );
    if let Some(value) = value {
        line.push_str(&format!(" = {}", gen_expression(compiler, value)?));
    }
    line.push(';');

    let kind = if declaration.is_constant {
        SymbolKind::Constant
    } else {
        SymbolKind::Variable
    };
    compiler
        .scopes
        .define(Symbol::new(&declaration.name, static_type, kind));

    compiler.write_line(&line)
}

fn gen_assignment<W: Write>(
    compiler: &mut Compiler<W>,
    assignment: &Assignment,
) -> Result<(), Error> {
    match compiler.scopes.resolve(&assignment.name) {
        None => {
            return Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: assignment.name.clone(),
                },
                assignment.span.start.clone(),
            ))
        }
        Some(symbol) if symbol.is_constant() => {
            return Err(Error::new(
                ErrorImpl::AssignToConstant {
                    constant: assignment.name.clone(),
                },
                assignment.span.start.clone(),
            ))
        }
        Some(_) => {}
    }

    let value = gen_expression(compiler, &assignment.value)?;
    compiler.write_line(&format!("{} = {};", assignment.name, value))
}

fn gen_if_else<W: Write>(compiler: &mut Compiler<W>, if_else: &IfElse) -> Result<(), Error> {
    let condition = gen_expression(compiler, &if_else.condition)?;
    compiler.write_line(&format!("if ({}) {{", condition))?;
    gen_block(compiler, &if_else.consequence)?;

    if let Some(alternative) = &if_else.alternative {
        compiler.write_line("} else {")?;
        gen_block(compiler, alternative)?;
    }

    compiler.write_line("}")
}

fn gen_function<W: Write>(
    compiler: &mut Compiler<W>,
    function: &Function,
    name: &str,
) -> Result<(), Error> {
    let return_type = function.resolved_return_type();

    // Visible to its own body for recursion.
    compiler.scopes.define(Symbol::new(
        name,
        return_type.clone(),
        SymbolKind::Function,
    ));

    let parameters = function
        .parameters
        .iter()
        .map(|parameter| {
            if parameter.variadic {
                format!("...{}: {}", parameter.name, parameter.param_type.target_name())
            } else {
                format!("{}: {}", parameter.name, parameter.param_type.target_name())
            }
        })
        .collect::<Vec<String>>()
        .join(", ");

    compiler.write_line(&format!(
        "function {}({}): {} {{",
        name,
        parameters,
        return_type.target_name()
    ))?;

    compiler.nested(|compiler| {
        for parameter in &function.parameters {
            compiler.scopes.define(Symbol::new(
                &parameter.name,
                parameter.param_type.clone(),
                SymbolKind::Parameter,
            ));
        }
        for statement in &function.body.body {
            gen_statement(compiler, statement)?;
        }
        Ok(())
    })?;

    compiler.write_line("}")
}
