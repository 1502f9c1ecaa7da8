//! Error types and error handling for the translator.
//!
//! This module defines the error types used throughout translation.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants grouped into lexical, syntax, semantic and
//!   resource categories
//! - Error names and helpful tips for display

pub mod errors;
