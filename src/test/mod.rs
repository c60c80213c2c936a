//! Element factories shared by the unit tests.

use crate::document::{Element, Scope, Token, TokenData};

/// Line every text factory token is placed on.
pub const TEXT_LINE: u32 = 12;

/// Offset of the first token produced by the binary factory.
pub const BINARY_BASE_OFFSET: u64 = 0x100;

// Helper function to create a text-format `P` record
pub fn text_property(name: &str, type_name: &str, values: &[&str]) -> Element {
    Element::new("P")
        .with_tokens([
            Token::text(format!("\"{name}\""), TEXT_LINE),
            Token::text(format!("\"{type_name}\""), TEXT_LINE),
            Token::text("\"\"", TEXT_LINE),
            Token::text("\"A\"", TEXT_LINE),
        ])
        .with_tokens(
            values
                .iter()
                .map(|value| Token::text(*value, TEXT_LINE)),
        )
}

// Helper function to create a binary-format `P` record, one token every 8 bytes
pub fn binary_property(name: &str, type_name: &str, values: &[TokenData]) -> Element {
    let prefix = [
        TokenData::String(name.to_string()),
        TokenData::String(type_name.to_string()),
        TokenData::String(String::new()),
        TokenData::String("A".to_string()),
    ];

    let tokens = prefix
        .into_iter()
        .chain(values.iter().cloned())
        .zip((0u64..).map(|i| BINARY_BASE_OFFSET + i * 8))
        .map(|(data, offset)| Token::new(data, crate::document::SourceLocation::Offset(offset)));

    Element::new("P").with_tokens(tokens)
}

// Helper function to wrap records into a `Properties70` block
pub fn property_block(properties: impl IntoIterator<Item = Element>) -> Element {
    Element::new("Properties70").with_scope(properties.into_iter().collect::<Scope>())
}
