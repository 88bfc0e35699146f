//! Function header parsing
//!
//! `def name(a: T, b: U = default) -> R:` becomes a `FunctionSignature`
//! without its docstring; the problem reader fills that in separately.

use crate::error::ParseError;
use crate::lexer::TokenType;
use crate::parser::Parser;
use pgb_common::{FunctionSignature, Param, TypeExpr};

impl Parser {
    /// Parse a complete `def` header up to and including its colon
    pub fn parse_function_header(&mut self) -> Result<FunctionSignature, ParseError> {
        if self.check_identifier("async") {
            return Err(self.unsupported("async function"));
        }
        if !self.check_identifier("def") {
            let found = self.advance().ok_or_else(|| self.unsupported("empty header"))?;
            return Err(ParseError::UnexpectedToken {
                expected: "'def'".to_string(),
                found,
            });
        }
        self.advance();

        let name = self.expect_identifier("function name")?;
        self.expect(TokenType::LeftParen, "function header")?;
        let params = self.parse_params()?;
        self.expect(TokenType::RightParen, "function header")?;

        let returns = if self.match_token(&TokenType::Arrow) {
            Some(self.parse_annotation()?)
        } else {
            None
        };

        self.expect(TokenType::Colon, "function header")?;
        self.expect_end("function header")?;

        Ok(FunctionSignature::new(&name, params, returns, ""))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        while !self.check(&TokenType::RightParen) {
            match self.peek_nth(0) {
                // Bare `*` and `/` only change how arguments may be passed
                Some(TokenType::Star | TokenType::Slash)
                    if matches!(self.peek_nth(1), Some(TokenType::Comma | TokenType::RightParen)) =>
                {
                    self.advance();
                }
                Some(TokenType::Star | TokenType::StarStar) => {
                    return Err(self.unsupported("variadic parameter"));
                }
                _ => {
                    let name = self.expect_identifier("parameter list")?;
                    let annotation = if self.match_token(&TokenType::Colon) {
                        self.parse_annotation()?
                    } else {
                        TypeExpr::untyped()
                    };
                    if self.match_token(&TokenType::Equal) {
                        self.skip_default()?;
                    }
                    params.push(Param::new(&name, annotation));
                }
            }

            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Skip a default value expression without interpreting it
    fn skip_default(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek_nth(0) {
                None | Some(TokenType::EndOfFile) => {
                    return Err(ParseError::UnexpectedEndOfFile {
                        expected: "end of default value".to_string(),
                        location: self.current_location(),
                    });
                }
                Some(TokenType::Comma | TokenType::RightParen) if depth == 0 => return Ok(()),
                Some(TokenType::LeftParen | TokenType::LeftBracket | TokenType::LeftBrace) => depth += 1,
                Some(TokenType::RightParen | TokenType::RightBracket | TokenType::RightBrace) => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<FunctionSignature, ParseError> {
        let tokens = Lexer::new(input).tokenize().unwrap();
        Parser::new(tokens).parse_function_header()
    }

    #[test]
    fn test_typed_header() {
        let sig = parse("def below_zero(operations: List[int]) -> bool:").unwrap();
        assert_eq!(sig.name, "below_zero");
        assert_eq!(
            sig.params,
            vec![Param::new(
                "operations",
                TypeExpr::generic("List", vec![TypeExpr::named("int")])
            )]
        );
        assert_eq!(sig.returns, Some(TypeExpr::named("bool")));
    }

    #[test]
    fn test_multiline_header_with_defaults() {
        let sig = parse("def f(a: int,\n      b: str = ',',\n      c=[1, (2, 3)]):").unwrap();
        assert_eq!(sig.params.len(), 3);
        assert_eq!(sig.params[1], Param::new("b", TypeExpr::named("str")));
        assert_eq!(sig.params[2], Param::new("c", TypeExpr::untyped()));
        assert_eq!(sig.returns, None);
    }

    #[test]
    fn test_keyword_only_marker() {
        let sig = parse("def f(a: int, *, b: int) -> int:").unwrap();
        assert_eq!(sig.params.len(), 2);
    }

    #[test]
    fn test_variadic_is_unsupported() {
        assert!(matches!(parse("def f(*args):"), Err(ParseError::Unsupported { .. })));
        assert!(matches!(parse("def f(a, **kw):"), Err(ParseError::Unsupported { .. })));
    }

    #[test]
    fn test_missing_colon() {
        assert!(parse("def f(a)").is_err());
    }
}
