//! Code generation module for the compiler.
//!
//! This module walks the parsed Program and writes TypeScript. It handles:
//!
//! - Declarations, with types resolved through a scope arena when the
//!   initializer does not carry one
//! - Functions, conditionals, returns and assignments
//! - Builtin calls (`fmt.Println`, `len`)

pub mod compiler;
pub mod expr;
pub mod scope;
pub mod stmt;

#[cfg(test)]
mod tests;
