//! Structured records of a parsed FBX document.
//!
//! An [`Element`] is a key followed by an ordered list of [`Token`]s and an optional
//! nested [`Scope`] of child elements. Child elements keep their insertion order and
//! duplicate keys are preserved, which is what property tables rely on to report
//! duplicate property names deterministically.

use crate::document::token::{SourceLocation, Token};

/// A structured record: key, ordered tokens and optional children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    key: String,
    tokens: Vec<Token>,
    scope: Option<Scope>,
}

impl Element {
    /// Creates an element with the given key and no tokens or children.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Element {
            key: key.into(),
            tokens: Vec::new(),
            scope: None,
        }
    }

    /// Appends a token, returning the element for chaining.
    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    /// Appends several tokens, returning the element for chaining.
    #[must_use]
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = Token>) -> Self {
        self.tokens.extend(tokens);
        self
    }

    /// Attaches a nested scope, returning the element for chaining.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The record key, e.g. `"P"` for a property record.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The ordered token list following the key.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The nested child scope, if the record has one.
    #[must_use]
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Location of the first token, if any.
    #[must_use]
    pub fn location(&self) -> Option<SourceLocation> {
        self.tokens.first().map(Token::location)
    }
}

/// Ordered collection of child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    elements: Vec<Element>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child element, returning the scope for chaining.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// All children in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// First child with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.key == key)
    }

    /// All children with the given key, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |element| element.key == key)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the scope has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for Scope {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Scope {
            elements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_keeps_duplicates_in_order() {
        let scope = Scope::new()
            .with_element(Element::new("P").with_token(Token::text("first", 1)))
            .with_element(Element::new("Q"))
            .with_element(Element::new("P").with_token(Token::text("second", 3)));

        assert_eq!(scope.len(), 3);
        let names: Vec<_> = scope
            .get_all("P")
            .map(|e| e.tokens()[0].parse_string().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(scope.get("Q").map(Element::key), Some("Q"));
        assert!(scope.get("R").is_none());
    }

    #[test]
    fn test_element_location() {
        let element = Element::new("P").with_token(Token::binary_string("x", 77));
        assert_eq!(element.location(), Some(SourceLocation::Offset(77)));
        assert_eq!(Element::new("P").location(), None);
    }
}
