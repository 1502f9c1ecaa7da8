use log::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::{
            ArrayExpr, ArraySize, BooleanLiteral, CallExpr, Identifier, IndexExpr, InfixExpr,
            IntegerLiteral, PrefixExpr, StringLiteral,
        },
        types::StaticType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_function,
    types::{at_type_start, parse_array_bounds, parse_type},
};

/// Pratt loop: one NUD, then LEDs for as long as they bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(parser.unexpected(None)),
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = match parser.get_bp_lookup().get(&token_kind).copied() {
            Some(next_bp) if next_bp > bp => next_bp,
            _ => break,
        };

        // A registered power without a handler ends the expression here.
        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => {
                trace!("no infix handler for {}, expression ends", token_kind);
                break;
            }
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => Ok(Node::IntegerLiteral(IntegerLiteral {
                value,
                span: token.span,
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::Identifier => Ok(Node::Identifier(Identifier {
            value: token.value,
            span: token.span,
        })),
        TokenKind::String => Ok(Node::StringLiteral(StringLiteral {
            value: token.value,
            span: token.span,
        })),
        TokenKind::True | TokenKind::False => Ok(Node::BooleanLiteral(BooleanLiteral {
            value: token.kind == TokenKind::True,
            span: token.span,
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Node,
    bp: BindingPower,
) -> Result<Node, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Node::Infix(InfixExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Node::Prefix(PrefixExpr {
        span: Span {
            start: operator.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Comma separated expressions up to `close`, which is consumed.
fn parse_expr_list(
    parser: &mut Parser,
    close: TokenKind,
    allow_trailing_comma: bool,
) -> Result<Vec<Node>, Error> {
    let mut list = vec![];

    while parser.current_token_kind() != close {
        list.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();

        if !allow_trailing_comma && parser.current_token_kind() == close {
            return Err(parser.unexpected(Some("expected an expression after ','")));
        }
    }

    parser.expect(close)?;
    Ok(list)
}

pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let callee = match left {
        Node::Identifier(identifier) => identifier,
        other => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: other.to_string(),
                    message: String::from("only named functions can be called"),
                },
                other.get_span().start.clone(),
            ))
        }
    };

    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen, false)?;

    Ok(Node::FunctionCall(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: parser.get_position(),
        },
        callee: callee.value,
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Node::Index(IndexExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: parser.get_position(),
        },
        collection: Box::new(left),
        index: Box::new(index),
    }))
}

/// Array literals in all their spellings:
///
/// ```text
/// [3]int{1, 2, 3}   [...]int{1, 2}   []string{"a"}   [5]int   [1, 2, 3]
/// ```
///
/// `[N]` followed by a type is a size; `[N]` followed by anything else is a
/// one element bare list.
pub fn parse_array_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    let size = match parser.peek_token_kind() {
        TokenKind::CloseBracket | TokenKind::Ellipsis => {
            let size = parse_array_bounds(parser)?;
            if size == ArraySize::Slice && !at_type_start(parser) {
                return Err(Error::new(
                    ErrorImpl::ArrayLiteralError {
                        message: String::from("an empty array literal needs an element type"),
                    },
                    start,
                ));
            }
            size
        }
        _ => {
            parser.advance();
            let elements = parse_expr_list(parser, TokenKind::CloseBracket, false)?;

            let fixed_size = match elements.as_slice() {
                [Node::IntegerLiteral(size)] => Some(size.value as usize),
                _ => None,
            };

            match fixed_size {
                Some(size) if parser.current_token_kind() == TokenKind::OpenBracket => {
                    return parse_sized_or_indexed(parser, start, size, elements);
                }
                Some(size) if at_type_start(parser) => ArraySize::Fixed(size),
                _ => {
                    let array = bare_array(elements, parser.span_from(start.clone()))?;
                    check_array_literal(&array)?;
                    return Ok(Node::Array(array));
                }
            }
        }
    };

    let element_type = parse_type(parser)?;
    finish_array(parser, start, size, element_type)
}

/// `[N]` followed by `[` is either the size of a nested array type
/// (`[2][3]int`) or a one element list indexed right away (`[5][0]`).
///
/// Only a literal second group followed by a type is a nested type.
fn parse_sized_or_indexed(
    parser: &mut Parser,
    start: Position,
    size: usize,
    elements: Vec<Node>,
) -> Result<Node, Error> {
    if matches!(
        parser.peek_token_kind(),
        TokenKind::CloseBracket | TokenKind::Ellipsis
    ) {
        let element_type = parse_type(parser)?;
        return finish_array(parser, start, ArraySize::Fixed(size), element_type);
    }

    let list_span = parser.span_from(start.clone());
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    if let Node::IntegerLiteral(_) = index {
        if at_type_start(parser) {
            let element_type = StaticType::array_of(parse_type(parser)?);
            return finish_array(parser, start, ArraySize::Fixed(size), element_type);
        }
    }

    let array = bare_array(elements, list_span)?;
    check_array_literal(&array)?;

    Ok(Node::Index(IndexExpr {
        collection: Box::new(Node::Array(array)),
        index: Box::new(index),
        span: parser.span_from(start),
    }))
}

/// Element list after a written element type, if there are braces.
fn finish_array(
    parser: &mut Parser,
    start: Position,
    size: ArraySize,
    element_type: StaticType,
) -> Result<Node, Error> {
    let elements = if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.advance();
        Some(parse_expr_list(parser, TokenKind::CloseCurly, true)?)
    } else {
        None
    };

    let array = ArrayExpr {
        element_type: Some(element_type),
        size,
        elements,
        span: parser.span_from(start),
    };
    check_array_literal(&array)?;

    Ok(Node::Array(array))
}

/// `[a, b, c]`; the element type comes from the first element, later when
/// that element is a name or a call.
fn bare_array(elements: Vec<Node>, span: Span) -> Result<ArrayExpr, Error> {
    let element_type = match elements.first() {
        None => {
            return Err(Error::new(
                ErrorImpl::ArrayLiteralError {
                    message: String::from("an empty array literal needs an element type"),
                },
                span.start,
            ))
        }
        Some(first) => first.static_type(),
    };

    Ok(ArrayExpr {
        element_type,
        size: ArraySize::Bare,
        elements: Some(elements),
        span,
    })
}

/// Rejects literals that overflow their declared size or mix element kinds.
fn check_array_literal(array: &ArrayExpr) -> Result<(), Error> {
    let (elements, element_type) = match (&array.elements, &array.element_type) {
        (Some(elements), Some(element_type)) => (elements, element_type),
        _ => return Ok(()),
    };

    if let ArraySize::Fixed(size) = array.size {
        if elements.len() > size {
            return Err(Error::new(
                ErrorImpl::ArrayLiteralError {
                    message: format!(
                        "{} elements do not fit in [{}]{}",
                        elements.len(),
                        size,
                        element_type
                    ),
                },
                array.span.start.clone(),
            ));
        }
    }

    for element in elements {
        // A function literal reports its return type, not its own.
        if let Node::Function(_) = element {
            continue;
        }

        if let Some(received) = element.static_type() {
            if &received != element_type {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: element_type.to_string(),
                        received: received.to_string(),
                    },
                    element.get_span().start.clone(),
                ));
            }
        }
    }

    Ok(())
}

pub fn parse_fn_expr(parser: &mut Parser) -> Result<Node, Error> {
    Ok(Node::Function(parse_function(parser)?))
}
