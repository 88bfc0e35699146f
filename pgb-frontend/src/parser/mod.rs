//! Recursive Descent Parser
//!
//! Parses token streams for the handful of source constructs a benchmark
//! problem needs: function headers, type annotations, literal values and
//! `assert` statements.

pub mod asserts;
pub mod literals;
pub mod signature;
pub mod types;

use crate::error::ParseError;
use crate::lexer::{Token, TokenType};
use pgb_common::SourceLocation;
use std::collections::VecDeque;

/// Source parser
pub struct Parser {
    pub(crate) tokens: VecDeque<Token>,
    last_location: SourceLocation,
}

impl Parser {
    /// Create a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_location = tokens
            .last()
            .map(|t| t.span.end.clone())
            .unwrap_or_else(SourceLocation::dummy);

        Self {
            tokens: tokens.into(),
            last_location,
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Peek at the token `offset` positions ahead
    pub(crate) fn peek_nth(&self, offset: usize) -> Option<&TokenType> {
        self.tokens.get(offset).map(|t| &t.token_type)
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        if let Some(token) = self.peek() {
            std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type)
        } else {
            matches!(token_type, TokenType::EndOfFile)
        }
    }

    /// Check if current token is the identifier `name`
    pub(crate) fn check_identifier(&self, name: &str) -> bool {
        self.peek().is_some_and(|t| t.token_type.is_identifier(name))
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token)
                if std::mem::discriminant(&token.token_type) == std::mem::discriminant(&token_type) =>
            {
                Ok(token)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("{} in {}", token_type, context),
                found: token,
            }),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: format!("{} in {}", token_type, context),
                location: self.last_location.clone(),
            }),
        }
    }

    /// Expect an identifier and return its name
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        let token = self.expect(TokenType::Identifier(String::new()), context)?;
        match token.token_type {
            TokenType::Identifier(name) => Ok(name),
            _ => Err(ParseError::UnexpectedToken {
                expected: format!("identifier in {context}"),
                found: token,
            }),
        }
    }

    /// Require that every token has been consumed
    pub(crate) fn expect_end(&mut self, context: &str) -> Result<(), ParseError> {
        self.expect(TokenType::EndOfFile, context).map(|_| ())
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .map(|t| t.span.start.clone())
            .unwrap_or_else(|| self.last_location.clone())
    }

    /// Build an `Unsupported` error at the current token
    pub(crate) fn unsupported(&self, construct: impl Into<String>) -> ParseError {
        ParseError::Unsupported {
            construct: construct.into(),
            location: self.current_location(),
        }
    }
}
