use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Ascending binding strength.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Prefix,
    Call,
    Index,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

const BINARY_OPERATORS: [(TokenKind, BindingPower); 13] = [
    (TokenKind::Or, BindingPower::LogicalOr),
    (TokenKind::And, BindingPower::LogicalAnd),
    (TokenKind::Equals, BindingPower::Equality),
    (TokenKind::NotEquals, BindingPower::Equality),
    (TokenKind::Less, BindingPower::Relational),
    (TokenKind::LessEquals, BindingPower::Relational),
    (TokenKind::Greater, BindingPower::Relational),
    (TokenKind::GreaterEquals, BindingPower::Relational),
    (TokenKind::Plus, BindingPower::Additive),
    (TokenKind::Dash, BindingPower::Additive),
    (TokenKind::Star, BindingPower::Multiplicative),
    (TokenKind::Slash, BindingPower::Multiplicative),
    (TokenKind::Percent, BindingPower::Multiplicative),
];

/// Binding power of a binary operator, `None` if the token is not one.
pub fn infix_binding_power(kind: TokenKind) -> Option<BindingPower> {
    BINARY_OPERATORS
        .iter()
        .find(|(operator, _)| *operator == kind)
        .map(|(_, bp)| *bp)
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Binary operators
    for (kind, bp) in BINARY_OPERATORS {
        parser.led(kind, bp, parse_binary_expr);
    }

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Index, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::Func, parse_fn_expr);

    // Statements
    parser.stmt(TokenKind::Const, parse_var_decl_stmt);
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Func, parse_fn_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
