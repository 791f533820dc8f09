use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal error for the compilation unit in progress. There is no recovery:
/// the first error raised is the one reported.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The two classes of failure the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Found by the validation walk before any AST is built.
    Syntax,
    /// Raised while transforming the tree or emitting C.
    Semantic,
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
            ErrorImpl::InvalidSyntax { .. } | ErrorImpl::MissingSyntax { .. } => {
                ErrorCategory::Syntax
            }
            _ => ErrorCategory::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidSyntax { .. } => "InvalidSyntax",
            ErrorImpl::MissingSyntax { .. } => "MissingSyntax",
            ErrorImpl::UnresolvedSymbol { .. } => "UnresolvedSymbol",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::TypingMisuse { .. } => "TypingMisuse",
            ErrorImpl::VariadicDefinition { .. } => "VariadicDefinition",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::MalformedTree { .. } => "MalformedTree",
            ErrorImpl::IncompleteSymbol { .. } => "IncompleteSymbol",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidSyntax { found } => {
                ErrorTip::Suggestion(format!("Unexpected input starting at `{}`", found))
            }
            ErrorImpl::MissingSyntax { expected } => {
                ErrorTip::Suggestion(format!("Expected `{}` before the end of input", expected))
            }
            ErrorImpl::UnresolvedSymbol { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared in this scope", name))
            }
            ErrorImpl::Redefinition { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::NotAType { name } => {
                ErrorTip::Suggestion(format!("`{}` does not name a type", name))
            }
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
            ErrorImpl::TypingMisuse { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::VariadicDefinition { function } => ErrorTip::Suggestion(format!(
                "`{}` takes `...`, only external functions may be variadic",
                function
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::MalformedTree { .. } | ErrorImpl::IncompleteSymbol { .. } => ErrorTip::None,
        }
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

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("syntax error near {found:?}")]
    InvalidSyntax { found: String },
    #[error("syntax error: missing {expected:?}")]
    MissingSyntax { expected: String },
    #[error("unresolved symbol {name:?}")]
    UnresolvedSymbol { name: String },
    #[error("symbol {name:?} redefined in the same scope")]
    Redefinition { name: String },
    #[error("{name:?} is not a type")]
    NotAType { name: String },
    #[error("{name:?} is not callable")]
    NotCallable { name: String },
    #[error("typing used in the wrong position: {message}")]
    TypingMisuse { message: String },
    #[error("user function {function:?} cannot be variadic")]
    VariadicDefinition { function: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected tree shape: {message}")]
    MalformedTree { message: String },
    #[error("symbol {name:?} has no resolved typing")]
    IncompleteSymbol { name: String },
}
