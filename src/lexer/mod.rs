//! Lexical analysis module for the translator.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, type keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Whitespace handling, plus illegal tokens for anything unrecognised

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
