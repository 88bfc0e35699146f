//! Type annotation parsing
//!
//! Annotations become `TypeExpr` trees. `typing.` qualifiers are dropped,
//! string forward references are parsed recursively and `T | None` is
//! normalised to `Optional[T]`.

use crate::error::ParseError;
use crate::lexer::{Lexer, TokenType};
use crate::parser::Parser;
use pgb_common::TypeExpr;

impl Parser {
    /// Parse a complete annotation, including `|` unions
    pub fn parse_annotation(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_primary_type()?;
        if !self.check(&TokenType::Pipe) {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.match_token(&TokenType::Pipe) {
            members.push(self.parse_primary_type()?);
        }

        let none = TypeExpr::named("None");
        let others: Vec<TypeExpr> = members.iter().filter(|m| **m != none).cloned().collect();
        if others.len() == 1 && members.len() == 2 {
            Ok(TypeExpr::generic("Optional", others))
        } else {
            Ok(TypeExpr::generic("Union", members))
        }
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        let location = self.current_location();
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEndOfFile {
                expected: "type annotation".to_string(),
                location,
            });
        };

        match token.token_type {
            TokenType::Identifier(mut name) => {
                // `typing.List` and friends keep only the last segment
                while self.match_token(&TokenType::Dot) {
                    name = self.expect_identifier("qualified type name")?;
                }

                if !self.match_token(&TokenType::LeftBracket) {
                    return Ok(TypeExpr::Named(name));
                }

                let args = self.parse_type_list(TokenType::RightBracket, "type arguments")?;
                Ok(TypeExpr::Generic(name, args))
            }
            TokenType::LeftParen => {
                let elems = self.parse_type_list(TokenType::RightParen, "tuple type")?;
                Ok(TypeExpr::Tuple(elems))
            }
            // `Callable[[int], int]` style argument lists
            TokenType::LeftBracket => {
                let elems = self.parse_type_list(TokenType::RightBracket, "type list")?;
                Ok(TypeExpr::Tuple(elems))
            }
            TokenType::StringLiteral(text) => {
                let tokens = Lexer::with_origin(&text, &location.filename, location.line)
                    .tokenize()
                    .map_err(|e| ParseError::Unsupported {
                        construct: format!("forward reference '{text}' ({e})"),
                        location: location.clone(),
                    })?;
                let mut inner = Parser::new(tokens);
                let ty = inner.parse_annotation()?;
                inner.expect_end("forward reference")?;
                Ok(ty)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "type annotation".to_string(),
                found: token,
            }),
        }
    }

    /// Comma-separated annotations up to `close`, trailing comma allowed
    fn parse_type_list(&mut self, close: TokenType, context: &str) -> Result<Vec<TypeExpr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(&close) {
            if self.check(&TokenType::Dot) {
                return Err(self.unsupported("ellipsis in type arguments"));
            }
            items.push(self.parse_annotation()?);
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(close, context)?;
        Ok(items)
    }
}
