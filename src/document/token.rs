//! Tokens produced by the FBX tokenizers.
//!
//! A [`Token`] is the smallest lexical unit of a parsed document. The text tokenizer
//! yields raw lexemes tagged with their line number, while the binary tokenizer
//! yields already-typed scalars tagged with their byte offset. Both flavours expose
//! the same typed parse helpers, so consumers never branch on the input format.
//!
//! # Key Components
//!
//! - [`Token`] - A lexical unit with payload and source location
//! - [`TokenData`] - Text lexeme or typed binary scalar
//! - [`SourceLocation`] - Byte offset (binary) or line number (text)
//!
//! # Examples
//!
//! ```rust
//! use fbxprops::Token;
//!
//! let text = Token::text("\"Lcl Rotation\"", 12);
//! assert_eq!(text.parse_string()?, "Lcl Rotation");
//!
//! let binary = Token::binary_i32(42, 0x1f0);
//! assert_eq!(binary.parse_int()?, 42);
//! assert!(binary.is_binary());
//! # Ok::<(), fbxprops::Error>(())
//! ```

use std::fmt;

use crate::{Error, Result};

/// Where a token was found in its source document.
///
/// Binary and text origins are mutually exclusive: binary documents are addressed
/// by byte offset, text documents by line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    /// Byte offset into a binary document
    Offset(u64),
    /// 1-based line number in a text document
    Line(u32),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Offset(offset) => write!(f, "at offset {offset}"),
            SourceLocation::Line(line) => write!(f, "at line {line}"),
        }
    }
}

/// Payload of a [`Token`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenData {
    /// Raw lexeme from the text format; strings keep their surrounding quotes
    Text(String),
    /// Length-prefixed string record ('S')
    String(String),
    /// Boolean record ('C')
    Bool(bool),
    /// 16-bit integer record ('Y')
    I16(i16),
    /// 32-bit integer record ('I')
    I32(i32),
    /// 64-bit integer record ('L')
    I64(i64),
    /// Single precision record ('F')
    F32(f32),
    /// Double precision record ('D')
    F64(f64),
}

/// A single lexical unit of an FBX document.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    data: TokenData,
    location: SourceLocation,
}

impl Token {
    /// Creates a token from its payload and location.
    #[must_use]
    pub fn new(data: TokenData, location: SourceLocation) -> Self {
        Token { data, location }
    }

    /// Creates a text-format token found on `line`.
    #[must_use]
    pub fn text(lexeme: impl Into<String>, line: u32) -> Self {
        Token::new(TokenData::Text(lexeme.into()), SourceLocation::Line(line))
    }

    /// Creates a binary string token found at `offset`.
    #[must_use]
    pub fn binary_string(value: impl Into<String>, offset: u64) -> Self {
        Token::new(TokenData::String(value.into()), SourceLocation::Offset(offset))
    }

    /// Creates a binary 32-bit integer token found at `offset`.
    #[must_use]
    pub fn binary_i32(value: i32, offset: u64) -> Self {
        Token::new(TokenData::I32(value), SourceLocation::Offset(offset))
    }

    /// Creates a binary 64-bit integer token found at `offset`.
    #[must_use]
    pub fn binary_i64(value: i64, offset: u64) -> Self {
        Token::new(TokenData::I64(value), SourceLocation::Offset(offset))
    }

    /// Creates a binary double precision token found at `offset`.
    #[must_use]
    pub fn binary_f64(value: f64, offset: u64) -> Self {
        Token::new(TokenData::F64(value), SourceLocation::Offset(offset))
    }

    /// Returns the payload of this token.
    #[must_use]
    pub fn data(&self) -> &TokenData {
        &self.data
    }

    /// Returns where this token was found.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Returns `true` if this token was produced by the binary tokenizer.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        matches!(self.location, SourceLocation::Offset(_))
    }

    /// Reads the token as a string.
    ///
    /// Quoted text lexemes are returned without their quotes; unquoted lexemes are
    /// returned verbatim. Binary tokens must be string records.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenParse`] for non-string binary tokens.
    pub fn parse_string(&self) -> Result<String> {
        match &self.data {
            TokenData::Text(lexeme) => Ok(unquote(lexeme).to_string()),
            TokenData::String(value) => Ok(value.clone()),
            _ => Err(self.parse_error("string")),
        }
    }

    /// Reads the token as a 32-bit signed integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenParse`] if the lexeme is not an integer or the
    /// binary value does not fit into 32 bits.
    pub fn parse_int(&self) -> Result<i32> {
        match &self.data {
            TokenData::Text(lexeme) => lexeme
                .trim()
                .parse::<i32>()
                .map_err(|_| self.parse_error("int")),
            TokenData::Bool(value) => Ok(i32::from(*value)),
            TokenData::I16(value) => Ok(i32::from(*value)),
            TokenData::I32(value) => Ok(*value),
            TokenData::I64(value) => i32::try_from(*value).map_err(|_| self.parse_error("int")),
            _ => Err(self.parse_error("int")),
        }
    }

    /// Reads the token as a 64-bit signed integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenParse`] if the token is not an integer.
    pub fn parse_int64(&self) -> Result<i64> {
        match &self.data {
            TokenData::Text(lexeme) => lexeme
                .trim()
                .parse::<i64>()
                .map_err(|_| self.parse_error("int64")),
            TokenData::Bool(value) => Ok(i64::from(*value)),
            TokenData::I16(value) => Ok(i64::from(*value)),
            TokenData::I32(value) => Ok(i64::from(*value)),
            TokenData::I64(value) => Ok(*value),
            _ => Err(self.parse_error("int64")),
        }
    }

    /// Reads the token as a 64-bit object id.
    ///
    /// Binary ids are stored as signed 64-bit records and are reinterpreted
    /// bit-for-bit.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenParse`] if the token is not an unsigned integer.
    pub fn parse_id(&self) -> Result<u64> {
        match &self.data {
            TokenData::Text(lexeme) => lexeme
                .trim()
                .parse::<u64>()
                .map_err(|_| self.parse_error("id")),
            #[allow(clippy::cast_sign_loss)]
            TokenData::I64(value) => Ok(*value as u64),
            TokenData::I32(value) => u64::try_from(*value).map_err(|_| self.parse_error("id")),
            _ => Err(self.parse_error("id")),
        }
    }

    /// Reads the token as a single precision float.
    ///
    /// Text tokens accept integer lexemes as well. Binary tokens must be `F32` or
    /// `F64` records; integer records are rejected.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenParse`] if the token is not a float.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse_float(&self) -> Result<f32> {
        match &self.data {
            TokenData::Text(lexeme) => lexeme
                .trim()
                .parse::<f32>()
                .map_err(|_| self.parse_error("float")),
            TokenData::F32(value) => Ok(*value),
            TokenData::F64(value) => Ok(*value as f32),
            _ => Err(self.parse_error("float")),
        }
    }

    fn parse_error(&self, expected: &'static str) -> Error {
        Error::TokenParse {
            expected,
            location: self.location,
        }
    }
}

fn unquote(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(lexeme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string() {
        assert_eq!(Token::text("\"KString\"", 1).parse_string().unwrap(), "KString");
        assert_eq!(Token::text("A+", 1).parse_string().unwrap(), "A+");
        assert_eq!(Token::text("\"\"", 1).parse_string().unwrap(), "");
        assert_eq!(
            Token::binary_string("Lcl Scaling", 8)
                .parse_string()
                .unwrap(),
            "Lcl Scaling"
        );
        assert!(matches!(
            Token::binary_i32(3, 8).parse_string(),
            Err(Error::TokenParse {
                expected: "string",
                location: SourceLocation::Offset(8)
            })
        ));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(Token::text("-12", 1).parse_int().unwrap(), -12);
        assert_eq!(Token::binary_i32(7, 0).parse_int().unwrap(), 7);
        assert_eq!(
            Token::new(TokenData::Bool(true), SourceLocation::Offset(0))
                .parse_int()
                .unwrap(),
            1
        );
        assert!(Token::binary_i64(i64::MAX, 0).parse_int().is_err());
        assert!(Token::text("1.5", 4).parse_int().is_err());

        assert_eq!(
            Token::text("46186158000", 2).parse_int64().unwrap(),
            46_186_158_000
        );
        assert_eq!(Token::binary_i32(-4, 0).parse_int64().unwrap(), -4);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(
            Token::text("18446744073709551615", 1).parse_id().unwrap(),
            u64::MAX
        );
        assert_eq!(Token::binary_i64(-1, 0).parse_id().unwrap(), u64::MAX);
        assert!(Token::binary_i32(-1, 0).parse_id().is_err());
        assert!(Token::text("-5", 1).parse_id().is_err());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(Token::text("0.5", 1).parse_float().unwrap(), 0.5);
        assert_eq!(Token::text("3", 1).parse_float().unwrap(), 3.0);
        assert_eq!(Token::binary_f64(2.25, 0).parse_float().unwrap(), 2.25);
        assert!(matches!(
            Token::binary_i32(9, 0x20).parse_float(),
            Err(Error::TokenParse {
                expected: "float",
                location: SourceLocation::Offset(0x20)
            })
        ));
        assert!(Token::binary_i64(9, 0).parse_float().is_err());
        assert!(Token::new(TokenData::I16(9), SourceLocation::Offset(0))
            .parse_float()
            .is_err());
        assert!(matches!(
            Token::text("abc", 31).parse_float(),
            Err(Error::TokenParse {
                expected: "float",
                location: SourceLocation::Line(31)
            })
        ));
    }

    #[test]
    fn test_location() {
        assert!(Token::binary_i32(0, 12).is_binary());
        assert!(!Token::text("0", 12).is_binary());
        assert_eq!(SourceLocation::Offset(12).to_string(), "at offset 12");
        assert_eq!(SourceLocation::Line(3).to_string(), "at line 3");
    }
}
