//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the token stream into
//! an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, functions, control flow, assignment)
//! - Expression parsing (binary and prefix ops, calls, indexing, array literals)
//! - Type parsing for type annotations
//!
//! Statements need no terminator: every expression stops at the first token
//! that cannot continue it, and `;` is skipped where it appears.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
