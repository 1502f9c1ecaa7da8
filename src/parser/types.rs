//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - The primitive keywords `int`, `string` and `bool`
//! - Array types `[N]T`, `[...]T` and `[]T`, nested to any depth
//!
//! Like expression parsing it dispatches through a NUD lookup keyed by the
//! current token. Go types have no infix forms, so there is no LED table.

use std::collections::HashMap;

use crate::{
    ast::{expressions::ArraySize, types::StaticType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<StaticType, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::IntType, parse_primitive_type);
    parser.type_nud(TokenKind::StringType, parse_primitive_type);
    parser.type_nud(TokenKind::BoolType, parse_primitive_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
}

/// Whether the current token can begin a type.
pub fn at_type_start(parser: &Parser) -> bool {
    parser
        .get_type_nud_lookup()
        .contains_key(&parser.current_token_kind())
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<StaticType, Error> {
    let token = parser.advance();
    match token.kind {
        TokenKind::IntType => Ok(StaticType::Integer),
        TokenKind::StringType => Ok(StaticType::String),
        TokenKind::BoolType => Ok(StaticType::Bool),
        _ => Err(Error::new(
            ErrorImpl::UnknownType { type_: token.value },
            token.span.start,
        )),
    }
}

/// Parses the `[N]`, `[...]` or `[]` prefix shared by array types and array literals.
pub fn parse_array_bounds(parser: &mut Parser) -> Result<ArraySize, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let size = match parser.current_token_kind() {
        TokenKind::CloseBracket => ArraySize::Slice,
        TokenKind::Ellipsis => {
            parser.advance();
            ArraySize::Inferred
        }
        TokenKind::Integer => {
            let token = parser.advance();
            let size = token.value.parse::<usize>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError { token: token.value.clone() },
                    token.span.start.clone(),
                )
            })?;
            ArraySize::Fixed(size)
        }
        _ => return Err(parser.unexpected(Some("expected an array size"))),
    };

    parser.expect(TokenKind::CloseBracket)?;
    Ok(size)
}

pub fn parse_array_type(parser: &mut Parser) -> Result<StaticType, Error> {
    parse_array_bounds(parser)?;
    let element = parse_type(parser)?;

    Ok(StaticType::array_of(element))
}

/// Parses a type annotation at the current token.
///
/// An identifier where a type belongs is reported as an unknown type; any
/// other token is a syntax error.
pub fn parse_type(parser: &mut Parser) -> Result<StaticType, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None if token_kind == TokenKind::Identifier => Err(Error::new(
            ErrorImpl::UnknownType {
                type_: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
        None => Err(parser.unexpected(Some("expected a type"))),
    }
}
