//! Literal value parsing
//!
//! Test inputs and expected outputs are constant expressions: scalars,
//! lists, tuples and dicts, possibly nested. Anything that would need
//! evaluating (calls, arithmetic, comprehensions) is rejected.

use crate::error::ParseError;
use crate::lexer::TokenType;
use crate::parser::Parser;
use pgb_common::{Literal, SourceLocation, Value};

impl Parser {
    /// Parse one constant value
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_atom()?;

        // A trailing operator or call turns the constant into an expression
        if self.check(&TokenType::LeftParen)
            || self.check(&TokenType::LeftBracket)
            || self.check(&TokenType::Dot)
            || self.check(&TokenType::Star)
            || self.check(&TokenType::Plus)
            || self.check(&TokenType::Slash)
            || self.check(&TokenType::Percent)
            || self.check(&TokenType::StarStar)
        {
            return Err(self.unsupported("computed value"));
        }

        Ok(value)
    }

    fn parse_atom(&mut self) -> Result<Value, ParseError> {
        let location = self.current_location();
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEndOfFile {
                expected: "value".to_string(),
                location,
            });
        };

        match token.token_type {
            TokenType::IntLiteral(n) => Ok(Value::int(n)),
            TokenType::FloatLiteral(x) => Ok(Value::float(x)),
            TokenType::Minus => self.parse_signed_number(true, location),
            TokenType::Plus => self.parse_signed_number(false, location),
            TokenType::StringLiteral(mut s) => {
                // Adjacent literals concatenate
                while let Some(TokenType::StringLiteral(next)) = self.peek_nth(0) {
                    s.push_str(next);
                    self.advance();
                }
                Ok(Value::Scalar(Literal::Str(s)))
            }
            TokenType::Identifier(name) => match name.as_str() {
                "True" => Ok(Value::bool(true)),
                "False" => Ok(Value::bool(false)),
                "None" => Ok(Value::none()),
                _ => Err(ParseError::Unsupported {
                    construct: format!("name '{name}' in a value"),
                    location,
                }),
            },
            TokenType::LeftBracket => {
                let items = self.parse_value_list(TokenType::RightBracket, "list")?;
                Ok(Value::List(items))
            }
            TokenType::LeftParen => {
                if self.match_token(&TokenType::RightParen) {
                    return Ok(Value::Tuple(Vec::new()));
                }
                let first = self.parse_value()?;
                if self.match_token(&TokenType::RightParen) {
                    return Ok(first);
                }
                self.expect(TokenType::Comma, "tuple")?;
                let mut items = vec![first];
                items.extend(self.parse_value_list(TokenType::RightParen, "tuple")?);
                Ok(Value::Tuple(items))
            }
            TokenType::LeftBrace => self.parse_dict(),
            _ => Err(ParseError::UnexpectedToken {
                expected: "value".to_string(),
                found: token,
            }),
        }
    }

    /// The number after a unary sign
    fn parse_signed_number(&mut self, negate: bool, location: SourceLocation) -> Result<Value, ParseError> {
        match self.advance().map(|t| t.token_type) {
            Some(TokenType::IntLiteral(n)) => Ok(Value::int(if negate { -n } else { n })),
            Some(TokenType::FloatLiteral(x)) => Ok(Value::float(if negate { -x } else { x })),
            _ => Err(ParseError::Unsupported {
                construct: "unary operator on a non-number".to_string(),
                location,
            }),
        }
    }

    /// Comma-separated values up to `close`, trailing comma allowed
    fn parse_value_list(&mut self, close: TokenType, context: &str) -> Result<Vec<Value>, ParseError> {
        let mut items = Vec::new();
        while !self.check(&close) {
            items.push(self.parse_value()?);
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(close, context)?;
        Ok(items)
    }

    /// Dict body after the opening brace
    fn parse_dict(&mut self) -> Result<Value, ParseError> {
        let mut entries = Vec::new();
        while !self.check(&TokenType::RightBrace) {
            let key = self.parse_value()?;
            if !self.check(&TokenType::Colon) {
                return Err(self.unsupported("set literal"));
            }
            self.advance();
            let value = self.parse_value()?;
            entries.push((key, value));
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightBrace, "dict")?;
        Ok(Value::Dict(entries))
    }
}
