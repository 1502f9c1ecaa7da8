//! Abstract Syntax Tree definitions.
//!
//! This module defines the structure of the AST produced by the parser:
//!
//! - `ast` - The closed `Node` enum, structural dumps and source rendering
//! - `expressions` - Expression node types (literals, operators, calls, arrays)
//! - `statements` - Statement node types (declarations, functions, control flow)
//! - `types` - The `StaticType` model shared by the parser and the emitter

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
