use crate::{
    ast::{
        ast::Node,
        statements::{
            Assignment, CodeBlock, Declaration, ExpressionStmt, Function, IfElse, Parameter,
            ReturnStmt,
        },
        types::StaticType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{
    parser::Parser,
    types::{at_type_start, parse_type},
};

/// Parses one statement and any `;` terminators after it.
pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let token_kind = parser.current_token_kind();

    let stmt = if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
        handler(parser)?
    } else if token_kind == TokenKind::Identifier {
        match parser.peek_token_kind() {
            TokenKind::Declare => parse_short_decl_stmt(parser)?,
            TokenKind::Assignment => parse_assignment_stmt(parser)?,
            _ => parse_expression_stmt(parser)?,
        }
    } else {
        parse_expression_stmt(parser)?
    };

    parser.skip_terminators();
    Ok(stmt)
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::ExpressionStatement(ExpressionStmt {
        span: expression.get_span().clone(),
        expression: Box::new(expression),
    }))
}

/// `var`/`const` followed by a single binding or a parenthesised group.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();
    let is_constant = start_token.kind == TokenKind::Const;

    if parser.current_token_kind() != TokenKind::OpenParen {
        let declaration = parse_binding(parser, is_constant, start_token.span.start)?;
        return Ok(Node::Declaration(declaration));
    }

    parser.advance();
    let mut group = vec![];
    loop {
        parser.skip_terminators();
        if parser.current_token_kind() == TokenKind::CloseParen {
            break;
        }

        let start = parser.get_position();
        group.push(parse_binding(parser, is_constant, start)?);
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Node::Declaration(Declaration {
        name: String::new(),
        is_constant,
        explicit_type: None,
        inferred_type: None,
        value: None,
        group,
        is_group: true,
        span: parser.span_from(start_token.span.start),
    }))
}

/// `name [type] [= value]`
fn parse_binding(
    parser: &mut Parser,
    is_constant: bool,
    start: Position,
) -> Result<Declaration, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    // An identifier here is a type name we do not know.
    let explicit_type = if at_type_start(parser)
        || parser.current_token_kind() == TokenKind::Identifier
    {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    build_declaration(parser, name, is_constant, explicit_type, value, start)
}

pub fn parse_short_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.advance();
    let start = name.span.start.clone();
    parser.expect(TokenKind::Declare)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::Declaration(build_declaration(
        parser,
        name,
        false,
        None,
        Some(value),
        start,
    )?))
}

/// Applies the binding rules shared by every declaration form.
fn build_declaration(
    parser: &Parser,
    name: Token,
    is_constant: bool,
    explicit_type: Option<StaticType>,
    value: Option<Node>,
    start: Position,
) -> Result<Declaration, Error> {
    let position = name.span.start.clone();
    let name = name.value;

    let (value, inferred_type) = match value {
        // `[5]int` without braces declares the type only.
        Some(Node::Array(array)) if array.elements.is_none() => {
            (None, array.element_type.map(StaticType::array_of))
        }
        Some(Node::Function(mut function)) => {
            if function.name.is_none() {
                function.name = Some(name.clone());
            }
            let inferred = Some(function.resolved_return_type());
            (Some(Node::Function(function)), inferred)
        }
        Some(value) => {
            let inferred = value.static_type();
            (Some(value), inferred)
        }
        None => (None, None),
    };

    if is_constant {
        check_constant(&name, &explicit_type, &inferred_type, &value, position.clone())?;
    } else if value.is_none() && explicit_type.is_none() && inferred_type.is_none() {
        return Err(Error::new(
            ErrorImpl::ExpectedExplicitValue { variable: name },
            position,
        ));
    }

    Ok(Declaration {
        name,
        is_constant,
        explicit_type,
        inferred_type,
        value: value.map(Box::new),
        group: vec![],
        is_group: false,
        span: parser.span_from(start),
    })
}

fn check_constant(
    name: &str,
    explicit_type: &Option<StaticType>,
    inferred_type: &Option<StaticType>,
    value: &Option<Node>,
    position: Position,
) -> Result<(), Error> {
    let misuse = |message: &str| {
        Err(Error::new(
            ErrorImpl::ConstantMisuse {
                constant: String::from(name),
                message: String::from(message),
            },
            position.clone(),
        ))
    };

    let declared_type = explicit_type.as_ref().or(inferred_type.as_ref());
    if declared_type.is_some_and(StaticType::is_array) {
        return misuse("cannot have an array type");
    }

    match value {
        None => misuse("must be given a value"),
        Some(Node::FunctionCall(_)) => misuse("cannot be bound to a function call"),
        Some(Node::Index(_)) => misuse("cannot be bound to an index expression"),
        Some(_) => Ok(()),
    }
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.advance();
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::Assignment(Assignment {
        span: parser.span_from(name.span.start),
        name: name.value,
        value: Box::new(value),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => Some(Box::new(parse_expr(parser, BindingPower::Default)?)),
    };

    Ok(Node::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// `if cond { ... } [else { ... } | else if ...]`
///
/// An `else if` chain becomes an alternative block holding the nested `if`.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            let block_start = parser.get_position();
            let nested = parse_if_stmt(parser)?;
            Some(CodeBlock {
                body: vec![nested],
                span: parser.span_from(block_start),
            })
        } else {
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Node::IfElse(IfElse {
        condition: Box::new(condition),
        consequence,
        alternative,
        span: parser.span_from(start),
    }))
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<CodeBlock, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    loop {
        parser.skip_terminators();
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => return Err(parser.unexpected(Some("expected }"))),
            _ => body.push(parse_stmt(parser)?),
        }
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(CodeBlock {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    Ok(Node::Function(parse_function(parser)?))
}

/// `func [name](params) [type] { body }`, shared by declarations and literals.
pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect(TokenKind::Func)?.span.start;

    let name = if parser.current_token_kind() == TokenKind::Identifier {
        Some(parser.advance().value)
    } else {
        None
    };

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_type = match parser.current_token_kind() {
        TokenKind::OpenCurly => None,
        _ => Some(parse_type(parser)?),
    };

    let body = parse_block(parser)?;

    Ok(Function {
        name,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    })
}

/// Parameter list up to (not including) `)`.
///
/// Names without a type wait for the next type written in the list, so
/// `a, b int` gives both `a` and `b` an independent copy of `int`.
fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    let mut parameters = vec![];
    let mut pending: Vec<Token> = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected parameter name"),
            },
            parser.get_position(),
        );
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

        if parser.current_token_kind() == TokenKind::Ellipsis {
            flush_untyped(&pending)?;
            parser.advance();
            let element = parse_type(parser)?;
            parameters.push(Parameter {
                param_type: StaticType::array_of(element),
                variadic: true,
                span: parser.span_from(name.span.start.clone()),
                name: name.value,
            });

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            }
            if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected(Some("a variadic parameter must come last")));
            }
            break;
        }

        match parser.current_token_kind() {
            TokenKind::Comma | TokenKind::CloseParen => pending.push(name),
            _ => {
                let param_type = parse_type(parser)?;
                for untyped in pending.drain(..) {
                    parameters.push(Parameter {
                        param_type: param_type.clone(),
                        variadic: false,
                        span: untyped.span.clone(),
                        name: untyped.value,
                    });
                }
                parameters.push(Parameter {
                    param_type,
                    variadic: false,
                    span: parser.span_from(name.span.start.clone()),
                    name: name.value,
                });
            }
        }

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    flush_untyped(&pending)?;
    Ok(parameters)
}

fn flush_untyped(pending: &[Token]) -> Result<(), Error> {
    match pending.first() {
        Some(untyped) => Err(Error::new(
            ErrorImpl::MissingParameterType {
                parameter: untyped.value.clone(),
            },
            untyped.span.start.clone(),
        )),
        None => Ok(()),
    }
}
