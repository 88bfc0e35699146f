//! Literal parsing for the source lexer
//!
//! Numbers (with `_` separators, radix prefixes and exponents) and string
//! literals in all four quoting styles.

use crate::error::LexError;
use crate::lexer::{Lexer, TokenType};

impl Lexer {
    /// Collect characters accepted by `accept`, dropping `_` separators
    fn take_digits(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                digits.push(ch);
                self.advance();
            } else if ch == '_' && self.peek_char(1).is_some_and(&accept) {
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    /// Tokenize an integer or floating point literal
    pub fn tokenize_number(&mut self) -> Result<TokenType, LexError> {
        let start = self.current_location();

        if self.current_char() == Some('0') {
            let radix = match self.peek_char(1).map(|c| c.to_ascii_lowercase()) {
                Some('x') => Some(16),
                Some('o') => Some(8),
                Some('b') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance(); // '0'
                self.advance(); // radix letter
                let digits = self.take_digits(|c| c.is_digit(radix));
                return i64::from_str_radix(&digits, radix)
                    .map(TokenType::IntLiteral)
                    .map_err(|_| LexError::InvalidNumber {
                        text: digits,
                        location: start,
                    });
            }
        }

        let mut text = self.take_digits(|c| c.is_ascii_digit());
        let mut is_float = false;

        if self.current_char() == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            text.push_str(&self.take_digits(|c| c.is_ascii_digit()));
        }

        if matches!(self.current_char(), Some('e') | Some('E')) {
            let signed = matches!(self.peek_char(1), Some('+') | Some('-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push('e');
                self.advance();
                if signed {
                    if let Some(sign) = self.advance() {
                        text.push(sign);
                    }
                }
                text.push_str(&self.take_digits(|c| c.is_ascii_digit()));
            }
        }

        // Imaginary suffixes and other trailing letters
        if self.current_char().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            while let Some(ch) = self.current_char() {
                if ch.is_alphanumeric() || ch == '_' {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            return Err(LexError::InvalidNumber { text, location: start });
        }

        if is_float {
            text.parse::<f64>()
                .map(TokenType::FloatLiteral)
                .map_err(|_| LexError::InvalidNumber { text, location: start })
        } else {
            text.parse::<i64>()
                .map(TokenType::IntLiteral)
                .map_err(|_| LexError::InvalidNumber { text, location: start })
        }
    }

    /// Tokenize a quoted string; the lexer sits on the opening quote
    pub fn tokenize_string(&mut self, raw: bool) -> Result<TokenType, LexError> {
        let start = self.current_location();
        let quote = match self.advance() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(LexError::UnterminatedString { location: start }),
        };

        let triple = self.current_char() == Some(quote) && self.peek_char(1) == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }

        let mut value = String::new();
        loop {
            match self.current_char() {
                None => return Err(LexError::UnterminatedString { location: start }),
                Some(c) if c == quote => {
                    if !triple {
                        self.advance();
                        break;
                    }
                    if self.peek_char(1) == Some(quote) && self.peek_char(2) == Some(quote) {
                        self.advance();
                        self.advance();
                        self.advance();
                        break;
                    }
                    value.push(c);
                    self.advance();
                }
                Some('\n') if !triple => {
                    return Err(LexError::UnterminatedString { location: start });
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.advance() else {
                        return Err(LexError::UnterminatedString { location: start });
                    };
                    if raw {
                        value.push('\\');
                        value.push(escaped);
                    } else {
                        self.push_escape(escaped, &mut value);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(TokenType::StringLiteral(value))
    }

    /// Decode the escape sequence whose leading backslash was consumed
    fn push_escape(&mut self, escaped: char, value: &mut String) {
        match escaped {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            '0' => value.push('\0'),
            '\\' => value.push('\\'),
            '\'' => value.push('\''),
            '"' => value.push('"'),
            '\n' => {}
            'x' | 'u' => {
                let width = if escaped == 'x' { 2 } else { 4 };
                let hex: String = (0..width).filter_map(|i| self.peek_char(i)).collect();
                let decoded = (hex.len() == width)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        for _ in 0..width {
                            self.advance();
                        }
                        value.push(ch);
                    }
                    None => {
                        value.push('\\');
                        value.push(escaped);
                    }
                }
            }
            other => {
                value.push('\\');
                value.push(other);
            }
        }
    }
}
