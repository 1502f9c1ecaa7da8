use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The four families every error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Semantic,
    Resource,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::ExpectedExplicitValue { .. }
            | ErrorImpl::MissingParameterType { .. }
            | ErrorImpl::ArrayLiteralError { .. } => ErrorCategory::Syntax,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::UnsupportedNode { .. }
            | ErrorImpl::ConstantMisuse { .. }
            | ErrorImpl::NotIndexable { .. }
            | ErrorImpl::AssignToConstant { .. }
            | ErrorImpl::TypeMatchError { .. } => ErrorCategory::Semantic,
            ErrorImpl::Io { .. } => ErrorCategory::Resource,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            ErrorImpl::MissingParameterType { .. } => "MissingParameterType",
            ErrorImpl::ArrayLiteralError { .. } => "ArrayLiteralError",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnsupportedNode { .. } => "UnsupportedNode",
            ErrorImpl::ConstantMisuse { .. } => "ConstantMisuse",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::AssignToConstant { .. } => "AssignToConstant",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token } => {
                ErrorTip::Suggestion(format!("Character `{}` is not part of the language", token))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::ExpectedExplicitValue { variable } => ErrorTip::Suggestion(format!(
                "`{}` needs an initial value or an explicit type",
                variable
            )),
            ErrorImpl::MissingParameterType { parameter } => {
                ErrorTip::Suggestion(format!("Parameter `{}` is never given a type", parameter))
            }
            ErrorImpl::ArrayLiteralError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("`{}` is not declared in this scope", variable))
            }
            ErrorImpl::UnsupportedNode { node } => {
                ErrorTip::Suggestion(format!("{} cannot be emitted here", node))
            }
            ErrorImpl::ConstantMisuse { constant, message } => {
                ErrorTip::Suggestion(format!("Constant `{}` {}", constant, message))
            }
            ErrorImpl::NotIndexable { type_ } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be indexed", type_))
            }
            ErrorImpl::AssignToConstant { constant } => {
                ErrorTip::Suggestion(format!("`{}` is a constant and cannot be reassigned", constant))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(
            ErrorImpl::Io {
                message: error.to_string(),
            },
            Position::null(),
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_:?} found")]
    UnknownType { type_: String },
    #[error("declaration of {variable:?} has neither a value nor a type")]
    ExpectedExplicitValue { variable: String },
    #[error("parameter {parameter:?} has no type")]
    MissingParameterType { parameter: String },
    #[error("invalid array literal: {message}")]
    ArrayLiteralError { message: String },
    #[error("{variable:?} is not declared")]
    VariableNotDeclared { variable: String },
    #[error("no emitter for {node}")]
    UnsupportedNode { node: String },
    #[error("constant {constant:?} {message}")]
    ConstantMisuse { constant: String, message: String },
    #[error("cannot index a value of type {type_}")]
    NotIndexable { type_: String },
    #[error("cannot assign to constant {constant:?}")]
    AssignToConstant { constant: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("i/o error: {message}")]
    Io { message: String },
}
