//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry point.
//! The parser pulls tokens from the lexer through a two-token window
//! (current + next) and uses a Pratt parser approach with NUD/LED handlers
//! for expressions, plus dedicated functions for statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::{collections::HashMap, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled from the lexer on demand; only the current token and one
/// token of lookahead are ever held.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The token being looked at
    current: Token,
    /// One token of lookahead
    next: Token,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    /// Creates a new Parser and fills the token window and lookup tables.
    pub fn new(mut lexer: Lexer) -> Self {
        let file = lexer.file();
        let current = lexer.next_token();
        let next = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            next,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.next
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.next.kind
    }

    /// Shifts the window by one token and returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let pulled = self.lexer.next_token();
        let next = std::mem::replace(&mut self.next, pulled);
        std::mem::replace(&mut self.current, next)
    }

    /// Builds the error for a token that does not fit where it was found.
    pub fn unexpected(&self, message: Option<&str>) -> Error {
        let token = self.current_token();
        let error = match (token.kind, message) {
            (TokenKind::Illegal, _) => ErrorImpl::UnrecognisedToken {
                token: token.value.clone(),
            },
            (TokenKind::EOF, Some(message)) => ErrorImpl::UnexpectedTokenDetailed {
                token: String::from("end of input"),
                message: String::from(message),
            },
            (TokenKind::EOF, None) => ErrorImpl::UnexpectedToken {
                token: String::from("end of input"),
            },
            (_, Some(message)) => ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            (_, None) => ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
        };

        Error::new(error, self.get_position())
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(Some(&format!("expected {}", expected_kind)))),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Skips any `;` statement terminators.
    pub fn skip_terminators(&mut self) {
        while self.current_token_kind() == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Span from `start` up to the current token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.get_position(),
        }
    }

    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut body = vec![];

        loop {
            self.skip_terminators();
            if !self.has_tokens() {
                break;
            }

            let stmt = parse_stmt(self)?;
            trace!("parsed {}", stmt.kind_name());
            body.push(stmt);
        }

        debug!("parsed {} top level statements from {}", body.len(), self.file);

        Ok(Program {
            body,
            span: self.span_from(Position(0, Rc::clone(&self.file))),
        })
    }
}

/// Parses source text into a Program.
///
/// This is the main entry point for parsing. It creates a lexer and a parser
/// instance and parses statements until EOF; the first error aborts the parse.
pub fn parse(source: String, file: Option<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(source, file));
    parser.parse_program()
}
