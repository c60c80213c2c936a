//! Fixed-position typed access to the tokens of a `P` record.
//!
//! A `P` record is laid out as `name, type tag, label, flags, value...`. The
//! [`TokenReader`] checks once that the record carries enough tokens for the shape
//! being decoded and then hands out typed reads by index. Reads are pure and may be
//! repeated.

use crate::{
    document::{Element, Token},
    Error, Result,
};

/// Index of the property name token.
pub(crate) const NAME_INDEX: usize = 0;
/// Index of the type tag token.
pub(crate) const TYPE_INDEX: usize = 1;
/// Index of the first value token.
pub(crate) const VALUE_INDEX: usize = 4;

/// Typed reader over the tokens of a single property record.
///
/// # Examples
///
/// ```rust
/// use fbxprops::{properties::TokenReader, Element, Token};
///
/// let element = Element::new("P").with_tokens([
///     Token::text("\"Visibility\"", 9),
///     Token::text("\"bool\"", 9),
///     Token::text("\"\"", 9),
///     Token::text("\"A\"", 9),
///     Token::text("1", 9),
/// ]);
///
/// let reader = TokenReader::new(&element, 5)?;
/// assert!(reader.read_bool(4)?);
/// # Ok::<(), fbxprops::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TokenReader<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenReader<'a> {
    /// Creates a reader, requiring at least `min_tokens` tokens on `element`.
    ///
    /// # Arguments
    /// * `element` - The `P` record to read from
    /// * `min_tokens` - Minimum token count, at least 2 (name and type tag)
    ///
    /// # Errors
    /// Returns [`crate::Error::NotEnoughTokens`] naming the declared type tag and the
    /// location of that tag (offset for binary input, line for text input) if the
    /// record is too short, or [`crate::Error::TokenParse`] if the type tag itself
    /// is unreadable.
    pub fn new(element: &'a Element, min_tokens: usize) -> Result<Self> {
        // name and type tag are always required
        let min_tokens = min_tokens.max(TYPE_INDEX + 1);
        let tokens = element.tokens();
        if tokens.len() < min_tokens {
            let Some(type_token) = tokens.get(TYPE_INDEX) else {
                return Err(malformed_error!(
                    "property record '{}' has no type tag",
                    element.key()
                ));
            };

            return Err(Error::NotEnoughTokens {
                type_name: type_token.parse_string()?,
                location: type_token.location(),
            });
        }

        Ok(TokenReader { tokens })
    }

    /// Number of tokens on the underlying record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the underlying record has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn token(&self, index: usize) -> Result<&'a Token> {
        self.tokens.get(index).ok_or_else(|| Error::NotEnoughTokens {
            type_name: self
                .tokens
                .get(TYPE_INDEX)
                .and_then(|token| token.parse_string().ok())
                .unwrap_or_default(),
            location: self.tokens[TYPE_INDEX].location(),
        })
    }

    /// Reads the token at `index` as a string.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not a string.
    pub fn read_string(&self, index: usize) -> Result<String> {
        self.token(index)?.parse_string()
    }

    /// Reads the token at `index` as an integer flag, nonzero meaning `true`.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not an integer.
    pub fn read_bool(&self, index: usize) -> Result<bool> {
        Ok(self.token(index)?.parse_int()? != 0)
    }

    /// Reads the token at `index` as a 32-bit signed integer.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not an integer.
    pub fn read_int(&self, index: usize) -> Result<i32> {
        self.token(index)?.parse_int()
    }

    /// Reads the token at `index` as a 64-bit unsigned id.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not an id.
    pub fn read_id(&self, index: usize) -> Result<u64> {
        self.token(index)?.parse_id()
    }

    /// Reads the token at `index` as a 64-bit signed integer.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not an integer.
    pub fn read_int64(&self, index: usize) -> Result<i64> {
        self.token(index)?.parse_int64()
    }

    /// Reads the token at `index` as a single precision float.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or the token is not numeric.
    pub fn read_float(&self, index: usize) -> Result<f32> {
        self.token(index)?.parse_float()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceLocation;
    use crate::test::{binary_property, text_property};

    #[test]
    fn test_reader_accepts_minimum() {
        let element = text_property("Weight", "double", &["0.5"]);
        let reader = TokenReader::new(&element, 5).unwrap();
        assert_eq!(reader.len(), 5);
        assert_eq!(reader.read_float(VALUE_INDEX).unwrap(), 0.5);
        // repeatable
        assert_eq!(reader.read_float(VALUE_INDEX).unwrap(), 0.5);
        assert_eq!(reader.read_string(NAME_INDEX).unwrap(), "Weight");
    }

    #[test]
    fn test_reader_text_location() {
        let element = text_property("Diffuse", "ColorRGB", &["1.0", "0.5"]);
        match TokenReader::new(&element, 7) {
            Err(Error::NotEnoughTokens {
                type_name,
                location,
            }) => {
                assert_eq!(type_name, "ColorRGB");
                assert!(matches!(location, SourceLocation::Line(_)));
            }
            other => panic!("expected NotEnoughTokens, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_binary_location() {
        let element = binary_property("Id", "ULongLong", &[]);
        match TokenReader::new(&element, 5) {
            Err(Error::NotEnoughTokens {
                type_name,
                location,
            }) => {
                assert_eq!(type_name, "ULongLong");
                assert!(matches!(location, SourceLocation::Offset(_)));
            }
            other => panic!("expected NotEnoughTokens, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_out_of_range_read() {
        let element = text_property("Weight", "double", &["0.5"]);
        let reader = TokenReader::new(&element, 5).unwrap();
        assert!(matches!(
            reader.read_float(5),
            Err(Error::NotEnoughTokens { .. })
        ));
    }

    #[test]
    fn test_reader_missing_type_tag() {
        let element = Element::new("P").with_token(Token::text("\"Lonely\"", 1));
        assert!(matches!(
            TokenReader::new(&element, 5),
            Err(Error::Malformed { .. })
        ));
    }
}
