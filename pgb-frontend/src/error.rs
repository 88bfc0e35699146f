//! Error types for reading benchmark source files

use crate::lexer::Token;
use pgb_common::SourceLocation;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {location}")]
    UnexpectedChar { ch: char, location: SourceLocation },

    #[error("Unterminated string literal starting at {location}")]
    UnterminatedString { location: SourceLocation },

    #[error("Invalid numeric literal '{text}' at {location}")]
    InvalidNumber { text: String, location: SourceLocation },

    #[error("Unsupported string prefix '{prefix}' at {location}")]
    UnsupportedPrefix { prefix: String, location: SourceLocation },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: Token },

    #[error("Unexpected end of input at {location}, expected {expected}")]
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },

    /// Well-formed source that this reader deliberately does not handle
    #[error("Unsupported {construct} at {location}")]
    Unsupported {
        construct: String,
        location: SourceLocation,
    },
}

/// Top-level error for reading one benchmark problem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No function definition found in {filename}")]
    MissingFunction { filename: String },
}
