//! Test assert parsing
//!
//! Reference test suites check the function through a `candidate` alias.
//! The accepted shapes are:
//!
//! - `assert candidate(args) == expected` (either operand order)
//! - `assert abs(candidate(args) - expected) < eps`
//! - `assert candidate(args) is True|False|None`
//! - `assert candidate(args)` and `assert not candidate(args)`
//!
//! An optional `, "message"` suffix is ignored.

use crate::error::ParseError;
use crate::lexer::TokenType;
use crate::parser::Parser;
use pgb_common::{TestCase, Value};

impl Parser {
    /// Parse one `assert` statement into a test case
    pub fn parse_assert(&mut self, candidate: &str) -> Result<TestCase, ParseError> {
        if !self.check_identifier("assert") {
            return Err(self.unsupported("statement other than assert"));
        }
        self.advance();

        let case = if self.check_identifier("not") {
            self.advance();
            let args = self.parse_candidate_call(candidate)?;
            TestCase {
                args,
                expected: Value::bool(false),
            }
        } else if self.check_identifier("abs") && self.peek_nth(1) == Some(&TokenType::LeftParen) {
            self.parse_approximate(candidate)?
        } else if self.check_identifier(candidate) {
            let args = self.parse_candidate_call(candidate)?;
            let expected = if self.match_token(&TokenType::EqualEqual) {
                self.parse_value()?
            } else if self.check_identifier("is") {
                self.advance();
                self.parse_value()?
            } else {
                Value::bool(true)
            };
            TestCase { args, expected }
        } else {
            let expected = self.parse_value()?;
            if !self.match_token(&TokenType::EqualEqual) {
                return Err(self.unsupported(format!("assert that does not call '{candidate}'")));
            }
            let args = self.parse_candidate_call(candidate)?;
            TestCase { args, expected }
        };

        if self.match_token(&TokenType::Comma) {
            // Failure message
            self.parse_value()?;
        }
        self.expect_end("assert")?;
        Ok(case)
    }

    /// `abs(candidate(args) - expected) < eps`
    fn parse_approximate(&mut self, candidate: &str) -> Result<TestCase, ParseError> {
        self.advance(); // abs
        self.expect(TokenType::LeftParen, "abs")?;
        let args = self.parse_candidate_call(candidate)?;
        self.expect(TokenType::Minus, "approximate comparison")?;
        let expected = self.parse_value()?;
        self.expect(TokenType::RightParen, "abs")?;

        if !self.match_token(&TokenType::Less) && !self.match_token(&TokenType::LessEqual) {
            return Err(self.unsupported("comparison other than '<' after abs()"));
        }
        self.parse_value()?; // tolerance

        Ok(TestCase { args, expected })
    }

    /// `candidate(v1, v2, ...)` returning the argument values
    fn parse_candidate_call(&mut self, candidate: &str) -> Result<Vec<Value>, ParseError> {
        if !self.check_identifier(candidate) {
            return Err(self.unsupported(format!("assert that does not call '{candidate}'")));
        }
        self.advance();
        self.expect(TokenType::LeftParen, "candidate call")?;

        let mut args = Vec::new();
        while !self.check(&TokenType::RightParen) {
            if matches!(self.peek_nth(0), Some(TokenType::Identifier(_)))
                && self.peek_nth(1) == Some(&TokenType::Equal)
            {
                return Err(self.unsupported("keyword argument"));
            }
            args.push(self.parse_value()?);
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightParen, "candidate call")?;

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<TestCase, ParseError> {
        let tokens = Lexer::new(input).tokenize().unwrap();
        Parser::new(tokens).parse_assert("candidate")
    }

    #[test]
    fn test_equality() {
        let case = parse("assert candidate([1, 2], 'x') == {'a': 1}").unwrap();
        assert_eq!(case.args, vec![Value::List(vec![Value::int(1), Value::int(2)]), Value::str("x")]);
        assert_eq!(case.expected, Value::Dict(vec![(Value::str("a"), Value::int(1))]));
    }

    #[test]
    fn test_reversed_equality() {
        let case = parse("assert 3 == candidate(1, 2)").unwrap();
        assert_eq!(case.args, vec![Value::int(1), Value::int(2)]);
        assert_eq!(case.expected, Value::int(3));
    }

    #[test]
    fn test_truthiness_forms() {
        assert_eq!(parse("assert candidate(5)").unwrap().expected, Value::bool(true));
        assert_eq!(parse("assert not candidate(5)").unwrap().expected, Value::bool(false));
        assert_eq!(parse("assert candidate(5) is None").unwrap().expected, Value::none());
    }

    #[test]
    fn test_approximate() {
        let case = parse("assert abs(candidate(3.5) - 0.5) < 1e-6").unwrap();
        assert_eq!(case.args, vec![Value::float(3.5)]);
        assert_eq!(case.expected, Value::float(0.5));
    }

    #[test]
    fn test_message_suffix() {
        let case = parse("assert candidate(1) == 2, \"This prints if this assert fails 1\"").unwrap();
        assert_eq!(case.expected, Value::int(2));
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(matches!(parse("assert True"), Err(ParseError::Unsupported { .. })));
        assert!(matches!(parse("assert candidate(x=1) == 2"), Err(ParseError::Unsupported { .. })));
        assert!(parse("assert candidate(1) != 2").is_err());
        assert!(matches!(parse("print(candidate(1))"), Err(ParseError::Unsupported { .. })));
    }
}
