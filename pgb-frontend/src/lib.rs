//! Polyglot Bench - Frontend
//!
//! Reads benchmark problems written in the source language:
//! - Lexer: tokenizes headers, annotations and asserts
//! - Parser: function headers, type annotations, literal values, asserts
//! - Problem reader: cuts a source file into signature, docstring and tests

pub mod error;
pub mod lexer;
pub mod parser;
pub mod problem;

pub use error::{FrontendError, LexError, ParseError};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use problem::read_problem;

use pgb_common::{SourceProblem, TypeExpr, Value};

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Read a complete benchmark source file
    pub fn parse_problem(source: &str, filename: &str) -> Result<SourceProblem, FrontendError> {
        read_problem(source, filename)
    }

    /// Parse a standalone type annotation such as `Dict[str, List[int]]`
    pub fn parse_annotation(text: &str) -> Result<TypeExpr, FrontendError> {
        let tokens = Lexer::new(text).tokenize()?;
        let mut parser = Parser::new(tokens);
        let ty = parser.parse_annotation()?;
        parser.expect_end("annotation")?;
        Ok(ty)
    }

    /// Parse a standalone constant value such as `[1, (2, 'x')]`
    pub fn parse_value(text: &str) -> Result<Value, FrontendError> {
        let tokens = Lexer::new(text).tokenize()?;
        let mut parser = Parser::new(tokens);
        let value = parser.parse_value()?;
        parser.expect_end("value")?;
        Ok(value)
    }

    /// Tokenize source text (for debugging)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, FrontendError> {
        Ok(Lexer::new(source).tokenize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_parse_annotation() {
        let ty = Frontend::parse_annotation("Optional[Tuple[int, str]]").unwrap();
        assert_eq!(ty.to_string(), "Optional[Tuple[int, str]]");
    }

    #[test]
    fn test_frontend_parse_value() {
        let value = Frontend::parse_value("[1, (2, 'x')]").unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::int(1), Value::Tuple(vec![Value::int(2), Value::str("x")])])
        );
    }

    #[test]
    fn test_frontend_trailing_input() {
        assert!(matches!(
            Frontend::parse_annotation("int str"),
            Err(FrontendError::Parse(ParseError::UnexpectedToken { .. }))
        ));
    }

    #[test]
    fn test_frontend_tokenize() {
        let tokens = Frontend::tokenize_source("x: int = 42").unwrap();
        // x, :, int, =, 42, EOF
        assert_eq!(tokens.len(), 6);
        assert!(matches!(tokens[4].token_type, TokenType::IntLiteral(42)));
    }
}
