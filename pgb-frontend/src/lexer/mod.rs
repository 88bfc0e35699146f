//! Source Lexer
//!
//! Tokenizes snippets of benchmark source: function headers, type
//! annotations and test asserts. Newlines are plain whitespace here because
//! the problem reader has already cut the file into logical statements.

pub mod literals;
pub mod token;

pub use token::{Token, TokenType};

use crate::error::LexError;
use pgb_common::{SourceLocation, SourceSpan};

/// Source lexer
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
    filename: String,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(input: &str) -> Self {
        Self::with_origin(input, "<input>", 1)
    }

    /// Lexer for a snippet that starts at `first_line` of `filename`
    pub fn with_origin(input: &str, filename: &str, first_line: u32) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: first_line,
            column: 1,
            filename: filename.to_string(),
        }
    }

    /// Get current character
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Get current location
    pub(crate) fn current_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    /// Skip whitespace, line continuations and `#` comments
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '\\' && self.peek_char(1) == Some('\n') {
                self.advance();
                self.advance();
            } else if ch == '#' {
                while let Some(c) = self.current_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Tokenize an identifier, or a prefixed string literal such as `r"..."`
    fn tokenize_identifier(&mut self) -> Result<TokenType, LexError> {
        let start = self.current_location();
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if matches!(self.current_char(), Some('"') | Some('\'')) && identifier.len() <= 2 {
            let prefix = identifier.to_ascii_lowercase();
            return match prefix.as_str() {
                "r" => self.tokenize_string(true),
                "u" => self.tokenize_string(false),
                "b" | "f" | "rb" | "br" | "fr" | "rf" => Err(LexError::UnsupportedPrefix {
                    prefix: identifier,
                    location: start,
                }),
                _ => Ok(TokenType::Identifier(identifier)),
            };
        }

        Ok(TokenType::Identifier(identifier))
    }

    /// Consume `second` if it follows, choosing between a one- and a
    /// two-character operator
    fn one_or_two(&mut self, second: char, double: TokenType, single: TokenType) -> TokenType {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some(ch) if ch.is_alphabetic() || ch == '_' => self.tokenize_identifier()?,

            Some(ch) if ch.is_ascii_digit() => self.tokenize_number()?,

            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.tokenize_number()?
            }

            Some('"') | Some('\'') => self.tokenize_string(false)?,

            Some('+') => {
                self.advance();
                TokenType::Plus
            }
            Some('-') => self.one_or_two('>', TokenType::Arrow, TokenType::Minus),
            Some('*') => self.one_or_two('*', TokenType::StarStar, TokenType::Star),
            Some('/') => {
                self.advance();
                TokenType::Slash
            }
            Some('%') => {
                self.advance();
                TokenType::Percent
            }
            Some('|') => {
                self.advance();
                TokenType::Pipe
            }
            Some('=') => self.one_or_two('=', TokenType::EqualEqual, TokenType::Equal),
            Some('<') => self.one_or_two('=', TokenType::LessEqual, TokenType::Less),
            Some('>') => self.one_or_two('=', TokenType::GreaterEqual, TokenType::Greater),
            Some('!') if self.peek_char(1) == Some('=') => {
                self.advance();
                self.advance();
                TokenType::BangEqual
            }

            Some('(') => {
                self.advance();
                TokenType::LeftParen
            }
            Some(')') => {
                self.advance();
                TokenType::RightParen
            }
            Some('{') => {
                self.advance();
                TokenType::LeftBrace
            }
            Some('}') => {
                self.advance();
                TokenType::RightBrace
            }
            Some('[') => {
                self.advance();
                TokenType::LeftBracket
            }
            Some(']') => {
                self.advance();
                TokenType::RightBracket
            }
            Some(',') => {
                self.advance();
                TokenType::Comma
            }
            Some(':') => {
                self.advance();
                TokenType::Colon
            }
            Some(';') => {
                self.advance();
                TokenType::Semicolon
            }
            Some('.') => {
                self.advance();
                TokenType::Dot
            }

            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    location: start_location,
                });
            }
        };

        let end_location = self.current_location();
        Ok(Token::new(token_type, SourceSpan::new(start_location, end_location)))
    }

    /// Tokenize the entire input, ending with an `EndOfFile` token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(input: &str) -> Vec<TokenType> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_function_header() {
        assert_eq!(
            types("def f(xs: List[int]) -> bool:"),
            vec![
                TokenType::Identifier("def".to_string()),
                TokenType::Identifier("f".to_string()),
                TokenType::LeftParen,
                TokenType::Identifier("xs".to_string()),
                TokenType::Colon,
                TokenType::Identifier("List".to_string()),
                TokenType::LeftBracket,
                TokenType::Identifier("int".to_string()),
                TokenType::RightBracket,
                TokenType::RightParen,
                TokenType::Arrow,
                TokenType::Identifier("bool".to_string()),
                TokenType::Colon,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            types("== != <= >= ** | -"),
            vec![
                TokenType::EqualEqual,
                TokenType::BangEqual,
                TokenType::LessEqual,
                TokenType::GreaterEqual,
                TokenType::StarStar,
                TokenType::Pipe,
                TokenType::Minus,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_comments_and_continuations_are_skipped() {
        assert_eq!(
            types("x \\\n + 1  # trailing"),
            vec![
                TokenType::Identifier("x".to_string()),
                TokenType::Plus,
                TokenType::IntLiteral(1),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_raw_string_prefix() {
        assert_eq!(
            types(r#"r"\d+""#),
            vec![TokenType::StringLiteral("\\d+".to_string()), TokenType::EndOfFile]
        );
    }

    #[test]
    fn test_unsupported_prefix() {
        let err = Lexer::new("f'{x}'").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnsupportedPrefix { .. }));
    }

    #[test]
    fn test_locations_follow_origin() {
        let tokens = Lexer::with_origin("a\n  b", "p.py", 10).tokenize().unwrap();
        assert_eq!(tokens[1].span.start, SourceLocation::new("p.py", 11, 3));
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("a ? b").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedChar { ch: '?', .. }));
    }
}
