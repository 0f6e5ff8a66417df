//! JSON decoding into document values
//!
//! A strict RFC 8259 parser producing [`Value`] trees:
//! - input must be valid UTF-8
//! - exactly one top-level value, optionally surrounded by whitespace
//! - `\u` escapes combine surrogate pairs; lone surrogates are rejected
//! - nesting deeper than the configured limit is rejected
//! - duplicate object keys: the last one wins

use docassert_core::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Default maximum nesting depth of arrays and objects
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Input is not valid UTF-8
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),

    /// Invalid JSON syntax
    #[error("{0}")]
    InvalidJson(String),

    /// Invalid number format
    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),

    /// Unexpected end of input
    #[error("unexpected end of JSON input")]
    UnexpectedEnd,

    /// Unexpected character
    #[error("invalid character '{0}' at offset {1}")]
    UnexpectedChar(char, usize),

    /// Non-whitespace content after the top-level value
    #[error("invalid character after top-level value at offset {0}")]
    TrailingCharacters(usize),

    /// Arrays/objects nested deeper than allowed
    #[error("exceeded max nesting depth of {0}")]
    DepthLimitExceeded(usize),
}

/// Decode a JSON string to Value
pub fn decode_json(json: &str) -> Result<Value, DecodeError> {
    JsonParser::new(json, DEFAULT_MAX_DEPTH).parse_document()
}

/// Decode raw bytes to Value with an explicit nesting limit
pub fn decode_slice(data: &[u8], max_depth: usize) -> Result<Value, DecodeError> {
    let json = std::str::from_utf8(data).map_err(|e| DecodeError::InvalidUtf8(e.valid_up_to()))?;
    JsonParser::new(json, max_depth).parse_document()
}

/// Simple recursive-descent JSON parser
struct JsonParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> JsonParser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        JsonParser {
            input,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn unexpected(&self) -> DecodeError {
        match self.peek() {
            Some(c) => DecodeError::UnexpectedChar(c, self.pos),
            None => DecodeError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_document(&mut self) -> Result<Value, DecodeError> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(DecodeError::TrailingCharacters(self.pos));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        self.skip_whitespace();

        match self.peek() {
            None => Err(DecodeError::UnexpectedEnd),
            Some('n') => self.parse_literal("null", Value::Null),
            Some('t') => self.parse_literal("true", Value::Bool(true)),
            Some('f') => self.parse_literal("false", Value::Bool(false)),
            Some('"') => self.parse_string().map(Value::String),
            Some('[') => self.nested(Self::parse_array),
            Some('{') => self.nested(Self::parse_object),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(DecodeError::UnexpectedChar(c, self.pos)),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, DecodeError>,
    ) -> Result<Value, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Value, DecodeError> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(DecodeError::InvalidJson(format!(
                "invalid literal at offset {}, expected '{}'",
                self.pos, literal
            )))
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        self.advance(); // consume opening quote
        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(DecodeError::UnexpectedEnd),
                Some('"') => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('b') => '\x08',
                        Some('f') => '\x0c',
                        Some('u') => {
                            self.advance();
                            result.push(self.parse_unicode_escape()?);
                            continue;
                        }
                        Some(c) => {
                            return Err(DecodeError::InvalidJson(format!(
                                "invalid escape '\\{}' at offset {}",
                                c, self.pos
                            )))
                        }
                        None => return Err(DecodeError::UnexpectedEnd),
                    };
                    result.push(escaped);
                    self.advance();
                }
                Some(c) if (c as u32) < 0x20 => {
                    return Err(DecodeError::InvalidJson(format!(
                        "invalid control character in string at offset {}",
                        self.pos
                    )))
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Parse the hex part of a `\u` escape, combining surrogate pairs
    fn parse_unicode_escape(&mut self) -> Result<char, DecodeError> {
        let start = self.pos;
        let high = self.parse_hex4()?;

        let code = if (0xD800..0xDC00).contains(&high) {
            if !self.input[self.pos..].starts_with("\\u") {
                return Err(invalid_escape(start));
            }
            self.pos += 2;
            let low = self.parse_hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(invalid_escape(start));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        char::from_u32(code).ok_or_else(|| invalid_escape(start))
    }

    fn parse_hex4(&mut self) -> Result<u32, DecodeError> {
        let hex = self
            .input
            .get(self.pos..self.pos + 4)
            .ok_or(DecodeError::UnexpectedEnd)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_escape(self.pos));
        }
        let code = u32::from_str_radix(hex, 16).map_err(|_| invalid_escape(self.pos))?;
        self.pos += 4;
        Ok(code)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos - start
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        // Integer part: a single zero or a non-zero digit run
        if self.peek() == Some('0') {
            self.advance();
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.invalid_number(start));
            }
        } else if self.skip_digits() == 0 {
            return Err(self.invalid_number(start));
        }

        if self.peek() == Some('.') {
            self.advance();
            if self.skip_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        if let Some('e' | 'E') = self.peek() {
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Number)
            .ok_or_else(|| DecodeError::InvalidNumber(num_str.to_string()))
    }

    fn invalid_number(&self, start: usize) -> DecodeError {
        let end = self.input[self.pos..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || "+-.".contains(c)))
            .map_or(self.input.len(), |i| self.pos + i);
        DecodeError::InvalidNumber(self.input[start..end].to_string())
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // consume '['
        self.skip_whitespace();

        let mut arr = Vec::new();

        if self.peek() == Some(']') {
            self.advance();
            return Ok(Value::Array(arr));
        }

        loop {
            arr.push(self.parse_value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    return Ok(Value::Array(arr));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // consume '{'
        self.skip_whitespace();

        let mut map = HashMap::new();

        if self.peek() == Some('}') {
            self.advance();
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();

            if self.peek() != Some('"') {
                return Err(self.unexpected());
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            self.expect(':')?;

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();

            match self.peek() {
                Some(',') => self.advance(),
                Some('}') => {
                    self.advance();
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }
}

fn invalid_escape(offset: usize) -> DecodeError {
    DecodeError::InvalidJson(format!("invalid unicode escape at offset {}", offset))
}
