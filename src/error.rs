use thiserror::Error;

use crate::document::SourceLocation;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every failure this library can report.
///
/// Recoverable structural issues inside a property table (stray child records,
/// unnamed properties, duplicate names) are *not* errors in the default lenient
/// mode; they are collected as [`crate::Diagnostics`] instead. The variants below
/// are fatal for the operation that produced them and are expected to abort the
/// surrounding document import.
///
/// # Error Categories
///
/// ## Property Decoding Errors
/// - [`Error::NotEnoughTokens`] - A known property type carries too few tokens
/// - [`Error::TokenParse`] - A token could not be read as the requested scalar
///
/// ## Table Construction Errors
/// - [`Error::MissingScope`] - The node owning a property table has no children
/// - [`Error::Malformed`] - Structural problem rejected by a strict configuration
///
/// ## Lookup Errors
/// - [`Error::RecursionLimit`] - A configured template depth was exceeded
///
/// # Examples
///
/// ```rust
/// use fbxprops::{decode_property, Element, Error, Token};
///
/// let element = Element::new("P")
///     .with_token(Token::text("Lcl Rotation", 3))
///     .with_token(Token::text("Vector3D", 3))
///     .with_token(Token::text("", 3))
///     .with_token(Token::text("A", 3))
///     .with_token(Token::text("10.0", 3));
///
/// match decode_property(&element) {
///     Err(Error::NotEnoughTokens { type_name, location }) => {
///         eprintln!("{type_name} truncated {location}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
///     Ok(value) => println!("{value:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A property with a recognised type tag has fewer tokens than its shape needs.
    ///
    /// The location is taken from the type-tag token, so it reports a byte offset
    /// for binary input and a line number for text input.
    ///
    /// # Fields
    ///
    /// * `type_name` - The declared type tag of the property
    /// * `location` - Where the offending record starts
    #[error("Not enough tokens for property of type {type_name} {location}")]
    NotEnoughTokens {
        /// The declared type tag of the property
        type_name: String,
        /// Source location of the type tag token
        location: SourceLocation,
    },

    /// A token could not be interpreted as the requested scalar type.
    #[error("Failed to parse token as {expected} {location}")]
    TokenParse {
        /// Human readable name of the requested type
        expected: &'static str,
        /// Source location of the token
        location: SourceLocation,
    },

    /// The element a property table was built from has no nested scope.
    #[error("Expected a nested scope below element '{key}'")]
    MissingScope {
        /// Key of the element lacking the scope
        key: String,
    },

    /// The document is damaged and could not be processed.
    ///
    /// Raised for structural issues when the table is built with a strict
    /// [`crate::PropertyTableConfig`]. Carries the source location where the
    /// malformation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Recursion limit reached.
    ///
    /// Only produced when [`crate::PropertyTableConfig::max_template_depth`] is
    /// set and a lookup walks more template hops than allowed.
    ///
    /// The associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_enough_tokens_message() {
        let err = Error::NotEnoughTokens {
            type_name: "KString".to_string(),
            location: SourceLocation::Offset(1024),
        };
        assert_eq!(
            err.to_string(),
            "Not enough tokens for property of type KString at offset 1024"
        );

        let err = Error::NotEnoughTokens {
            type_name: "Lcl Scaling".to_string(),
            location: SourceLocation::Line(17),
        };
        assert_eq!(
            err.to_string(),
            "Not enough tokens for property of type Lcl Scaling at line 17"
        );
    }

    #[test]
    fn test_malformed_macro() {
        let err = malformed_error!("duplicate property name: {}", "Visibility");
        match err {
            Error::Malformed { message, file, .. } => {
                assert_eq!(message, "duplicate property name: Visibility");
                assert!(file.ends_with("error.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
