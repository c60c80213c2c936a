//! Lazily decoded property tables with template fallback.
//!
//! Every FBX object carries a `Properties70` block of `P` records. Building a
//! [`PropertyTable`] only indexes those records by name; a record is decoded the
//! first time its name is looked up and the outcome, including "this record decodes
//! to nothing", is kept for the lifetime of the table.
//!
//! Names missing from a table are looked up in its template table, which holds the
//! defaults that the document's `Definitions` section declares for the object type.
//! Template results are never copied into the asking table: a value is cached only
//! in the table that owns its record.
//!
//! # Examples
//!
//! ```rust
//! use fbxprops::{Diagnostics, Element, PropertyTable, PropertyValue, Scope, Token};
//! use std::sync::Arc;
//!
//! fn p(name: &str, type_name: &str, value: &str) -> Element {
//!     Element::new("P").with_tokens([
//!         Token::text(format!("\"{name}\""), 1),
//!         Token::text(format!("\"{type_name}\""), 1),
//!         Token::text("\"\"", 1),
//!         Token::text("\"A\"", 1),
//!         Token::text(value, 1),
//!     ])
//! }
//!
//! let defaults = Element::new("Properties70")
//!     .with_scope(Scope::new().with_element(p("Visibility", "bool", "1")));
//! let node = Element::new("Properties70")
//!     .with_scope(Scope::new().with_element(p("Weight", "double", "0.5")));
//!
//! let diagnostics = Diagnostics::new();
//! let template = Arc::new(PropertyTable::new(&defaults, None, &diagnostics)?);
//! let table = PropertyTable::new(&node, Some(template), &diagnostics)?;
//!
//! assert_eq!(table.get("Weight")?, Some(&PropertyValue::Float(0.5)));
//! assert_eq!(table.get("Visibility")?, Some(&PropertyValue::Bool(true)));
//! assert_eq!(table.get("Missing")?, None);
//! # Ok::<(), fbxprops::Error>(())
//! ```

use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock},
};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    document::Element,
    properties::{
        config::PropertyTableConfig,
        decoder::decode_property,
        reader::NAME_INDEX,
        value::{FromPropertyValue, PropertyValue},
    },
    Error, Result,
};

/// Key of a property record.
pub const PROPERTY_KEY: &str = "P";

/// Minimum number of tokens for a `P` record to carry a usable name.
const NAME_MIN_TOKENS: usize = 4;

/// A reference-counted pointer to a `PropertyTable`, used for shared templates
pub type PropertyTableRc<'doc> = Arc<PropertyTable<'doc>>;

/// A raw `P` record and its decode outcome.
///
/// The `OnceLock` is the tri-state cache slot: unset means not yet attempted,
/// `Some(value)` and `None` are permanent results.
#[derive(Debug)]
struct LazyProperty<'doc> {
    element: &'doc Element,
    value: OnceLock<Option<PropertyValue>>,
}

impl<'doc> LazyProperty<'doc> {
    fn new(element: &'doc Element) -> Self {
        LazyProperty {
            element,
            value: OnceLock::new(),
        }
    }

    fn resolve(&self) -> Result<Option<&PropertyValue>> {
        if let Some(value) = self.value.get() {
            return Ok(value.as_ref());
        }

        let decoded = decode_property(self.element)?;
        // a concurrent caller may have stored first; keep whichever landed
        let _ = self.value.set(decoded);
        Ok(self.value.get().and_then(Option::as_ref))
    }

    fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

/// The properties of one document node.
///
/// Tables borrow the document they index, so the document must outlive them. A table
/// is `Send + Sync`; cache slots are filled through [`OnceLock`], so a table can be
/// shared as a template by any number of other tables.
#[derive(Debug)]
pub struct PropertyTable<'doc> {
    element: Option<&'doc Element>,
    template: Option<PropertyTableRc<'doc>>,
    properties: BTreeMap<String, LazyProperty<'doc>>,
    config: PropertyTableConfig,
}

impl Default for PropertyTable<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for PropertyTable<'_> {
    // Unlinks the template chain one level at a time so that dropping a long chain
    // does not recurse once per level. Stops at the first template still shared.
    fn drop(&mut self) {
        let mut next = self.template.take();
        while let Some(template) = next {
            next = Arc::into_inner(template).and_then(|mut table| table.template.take());
        }
    }
}

impl<'doc> PropertyTable<'doc> {
    /// Creates a table without records or template.
    #[must_use]
    pub fn empty() -> Self {
        PropertyTable {
            element: None,
            template: None,
            properties: BTreeMap::new(),
            config: PropertyTableConfig::default(),
        }
    }

    /// Creates a table without records that defers every lookup to `template`.
    #[must_use]
    pub fn from_template(template: PropertyTableRc<'doc>) -> Self {
        PropertyTable {
            element: None,
            template: Some(template),
            properties: BTreeMap::new(),
            config: PropertyTableConfig::default(),
        }
    }

    /// Indexes the `P` records below `element` using the lenient configuration.
    ///
    /// # Arguments
    /// * `element` - The property block, usually `Properties70`
    /// * `template` - Table consulted for names this table does not define
    /// * `diagnostics` - Sink for skipped and duplicate records
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingScope`] if `element` has no children block.
    pub fn new(
        element: &'doc Element,
        template: Option<PropertyTableRc<'doc>>,
        diagnostics: &Diagnostics,
    ) -> Result<Self> {
        Self::with_config(element, template, diagnostics, PropertyTableConfig::default())
    }

    /// Indexes the `P` records below `element` using an explicit configuration.
    ///
    /// Children whose key is not `P`, `P` records with fewer than four tokens or an
    /// empty name, and repeated names are skipped. Each is reported to `diagnostics`,
    /// or rejected if `config` asks for it. For repeated names the first record wins.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingScope`] if `element` has no children block, and
    /// [`crate::Error::Malformed`] for structural problems `config` rejects.
    pub fn with_config(
        element: &'doc Element,
        template: Option<PropertyTableRc<'doc>>,
        diagnostics: &Diagnostics,
        config: PropertyTableConfig,
    ) -> Result<Self> {
        let scope = element.scope().ok_or_else(|| Error::MissingScope {
            key: element.key().to_string(),
        })?;

        let mut properties = BTreeMap::new();
        for child in scope.elements() {
            if child.key() != PROPERTY_KEY {
                report(
                    diagnostics,
                    config.reject_foreign_elements,
                    DiagnosticCategory::PropertyTable,
                    "expected only P elements in property table".to_string(),
                    child,
                )?;
                continue;
            }

            let Some(name) = peek_property_name(child) else {
                report(
                    diagnostics,
                    config.reject_unnamed,
                    DiagnosticCategory::PropertyTable,
                    "could not read property name".to_string(),
                    child,
                )?;
                continue;
            };

            if properties.contains_key(&name) {
                report(
                    diagnostics,
                    config.reject_duplicates,
                    DiagnosticCategory::Property,
                    format!("duplicate property name, keeping first definition: {name}"),
                    child,
                )?;
                continue;
            }

            properties.insert(name, LazyProperty::new(child));
        }

        Ok(PropertyTable {
            element: Some(element),
            template,
            properties,
            config,
        })
    }

    /// Looks up a property, decoding it on first access.
    ///
    /// Resolution order: this table's cache, this table's raw records, then the
    /// template chain. A record decoded to nothing stays nothing; it does not fall
    /// through to the template. Template chains are walked iteratively.
    ///
    /// # Errors
    /// Returns the decode error of the owning record, which aborts the lookup, or
    /// [`crate::Error::RecursionLimit`] if the configured template depth is exceeded.
    pub fn get(&self, name: &str) -> Result<Option<&PropertyValue>> {
        let mut table = self;
        let mut depth = 0;

        loop {
            if let Some(property) = table.properties.get(name) {
                return property.resolve();
            }

            let Some(template) = table.template.as_deref() else {
                return Ok(None);
            };

            depth += 1;
            if let Some(max_depth) = self.config.max_template_depth {
                if depth > max_depth {
                    return Err(Error::RecursionLimit(max_depth));
                }
            }

            table = template;
        }
    }

    /// Looks up a property in this table only, ignoring the template.
    ///
    /// # Errors
    /// Returns the decode error of the record if decoding fails.
    pub fn get_local(&self, name: &str) -> Result<Option<&PropertyValue>> {
        match self.properties.get(name) {
            Some(property) => property.resolve(),
            None => Ok(None),
        }
    }

    /// Looks up a property and converts it to `T`.
    ///
    /// Yields `Ok(None)` if the property is missing or has a different shape.
    ///
    /// # Errors
    /// Returns the decode error of the owning record.
    pub fn get_as<T: FromPropertyValue>(&self, name: &str) -> Result<Option<T>> {
        Ok(self.get(name)?.and_then(T::from_property_value))
    }

    /// Like [`PropertyTable::get_as`], consulting the template only if `use_template`
    /// is set.
    ///
    /// # Errors
    /// Returns the decode error of the owning record.
    pub fn get_as_with<T: FromPropertyValue>(
        &self,
        name: &str,
        use_template: bool,
    ) -> Result<Option<T>> {
        let value = if use_template {
            self.get(name)?
        } else {
            self.get_local(name)?
        };
        Ok(value.and_then(T::from_property_value))
    }

    /// Looks up a property, converting it to `T` or falling back to `default`.
    ///
    /// # Errors
    /// Returns the decode error of the owning record.
    pub fn get_or<T: FromPropertyValue>(&self, name: &str, default: T) -> Result<T> {
        Ok(self.get_as(name)?.unwrap_or(default))
    }

    /// Decodes every record that has not been looked up yet.
    ///
    /// Records that decode to nothing are left out. The table's cache is not touched,
    /// so calling this twice decodes the same records twice, and a later
    /// [`PropertyTable::get`] still decodes and caches as usual.
    ///
    /// # Errors
    /// Returns the first decode error encountered.
    pub fn unparsed_properties(&self) -> Result<BTreeMap<String, PropertyValue>> {
        let mut result = BTreeMap::new();

        for (name, property) in &self.properties {
            if property.is_resolved() {
                continue;
            }

            if let Some(value) = decode_property(property.element)? {
                result.insert(name.clone(), value);
            }
        }

        Ok(result)
    }

    /// Returns `true` if `name` is defined by this table and has been decoded.
    #[must_use]
    pub fn is_cached(&self, name: &str) -> bool {
        self.properties
            .get(name)
            .is_some_and(LazyProperty::is_resolved)
    }

    /// Returns `true` if this table itself defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Names defined by this table, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties defined by this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if this table defines no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The element this table was built from.
    #[must_use]
    pub fn element(&self) -> Option<&'doc Element> {
        self.element
    }

    /// The template table, if any.
    #[must_use]
    pub fn template(&self) -> Option<&PropertyTableRc<'doc>> {
        self.template.as_ref()
    }

    /// The configuration this table was built with.
    #[must_use]
    pub fn config(&self) -> &PropertyTableConfig {
        &self.config
    }
}

fn peek_property_name(element: &Element) -> Option<String> {
    let tokens = element.tokens();
    if tokens.len() < NAME_MIN_TOKENS {
        return None;
    }

    tokens[NAME_INDEX]
        .parse_string()
        .ok()
        .filter(|name| !name.is_empty())
}

fn report(
    diagnostics: &Diagnostics,
    reject: bool,
    category: DiagnosticCategory,
    message: String,
    element: &Element,
) -> Result<()> {
    if reject {
        return Err(match element.location() {
            Some(location) => malformed_error!("{} ({})", message, location),
            None => malformed_error!(message),
        });
    }

    diagnostics.push(
        Diagnostic::new(DiagnosticSeverity::Warning, category, message)
            .with_key(element.key())
            .with_location(element.location()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::{Scope, Token},
        test::{property_block, text_property},
    };

    #[test]
    fn test_get_caches_result() {
        let block = property_block([text_property("Weight", "double", &["0.5"])]);
        let diagnostics = Diagnostics::new();
        let table = PropertyTable::new(&block, None, &diagnostics).unwrap();

        assert!(!table.is_cached("Weight"));
        let first = table.get("Weight").unwrap().unwrap();
        assert!(table.is_cached("Weight"));
        let second = table.get("Weight").unwrap().unwrap();

        assert_eq!(first, &PropertyValue::Float(0.5));
        assert!(std::ptr::eq(first, second));
        assert!(!diagnostics.has_any());
    }

    #[test]
    fn test_empty_decode_is_cached_and_hides_template() {
        let defaults = property_block([text_property("Custom", "double", &["2.0"])]);
        let block = property_block([text_property("Custom", "MyType", &[])]);
        let diagnostics = Diagnostics::new();

        let template = Arc::new(PropertyTable::new(&defaults, None, &diagnostics).unwrap());
        let table = PropertyTable::new(&block, Some(template), &diagnostics).unwrap();

        assert_eq!(table.get("Custom").unwrap(), None);
        assert!(table.is_cached("Custom"));
        assert_eq!(table.get("Custom").unwrap(), None);
    }

    #[test]
    fn test_missing_scope() {
        let element = Element::new("Properties70");
        let diagnostics = Diagnostics::new();
        assert!(matches!(
            PropertyTable::new(&element, None, &diagnostics),
            Err(Error::MissingScope { key }) if key == "Properties70"
        ));
    }

    #[test]
    fn test_construction_diagnostics() {
        let block = property_block([
            Element::new("Q").with_token(Token::text("1", 1)),
            Element::new("P").with_tokens([Token::text("\"Short\"", 2), Token::text("\"int\"", 2)]),
            text_property("", "int", &["1"]),
            text_property("Size", "int", &["1"]),
        ]);
        let diagnostics = Diagnostics::new();
        let table = PropertyTable::new(&block, None, &diagnostics).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.contains("Size"));
        assert_eq!(diagnostics.warning_count(), 3);
        assert_eq!(
            diagnostics
                .by_category(DiagnosticCategory::PropertyTable)
                .len(),
            3
        );
    }

    #[test]
    fn test_strict_rejects_duplicates() {
        let block = property_block([
            text_property("Size", "int", &["1"]),
            text_property("Size", "int", &["2"]),
        ]);
        let diagnostics = Diagnostics::new();
        let result = PropertyTable::with_config(
            &block,
            None,
            &diagnostics,
            PropertyTableConfig::strict(),
        );
        assert!(matches!(result, Err(Error::Malformed { .. })));
        assert!(!diagnostics.has_any());
    }

    #[test]
    fn test_strict_rejects_foreign_elements() {
        let block = Element::new("Properties70").with_scope(
            Scope::new().with_element(Element::new("Connections")),
        );
        let diagnostics = Diagnostics::new();
        assert!(matches!(
            PropertyTable::with_config(&block, None, &diagnostics, PropertyTableConfig::strict()),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_strict_rejects_unnamed() {
        let block = property_block([Element::new("P").with_tokens([
            Token::text("\"Short\"", 1),
            Token::text("\"int\"", 1),
        ])]);
        let diagnostics = Diagnostics::new();
        let result =
            PropertyTable::with_config(&block, None, &diagnostics, PropertyTableConfig::strict());
        assert!(matches!(
            result,
            Err(Error::Malformed { ref message, .. })
                if message == "could not read property name (at line 1)"
        ));
        assert!(!diagnostics.has_any());
    }

    #[test]
    fn test_drop_deep_template_chain() {
        let diagnostics = Diagnostics::new();
        let root_block = property_block([text_property("N", "int", &["4"])]);
        let mut chain = Arc::new(PropertyTable::new(&root_block, None, &diagnostics).unwrap());
        for _ in 0..200_000 {
            chain = Arc::new(PropertyTable::from_template(chain));
        }
        assert_eq!(chain.get("N").unwrap(), Some(&PropertyValue::Int(4)));

        let shared = Arc::clone(&chain);
        let leaf = PropertyTable::from_template(chain);
        drop(leaf);
        // still reachable through the remaining handle
        assert_eq!(shared.get("N").unwrap(), Some(&PropertyValue::Int(4)));
        drop(shared);
    }

    #[test]
    fn test_template_depth_limit() {
        let diagnostics = Diagnostics::new();
        let root_block = property_block([text_property("Deep", "int", &["7"])]);
        let mut table = Arc::new(PropertyTable::new(&root_block, None, &diagnostics).unwrap());
        for _ in 0..4 {
            table = Arc::new(PropertyTable::from_template(table));
        }

        let block = property_block(Vec::new());
        let bounded = PropertyTable::with_config(
            &block,
            Some(Arc::clone(&table)),
            &diagnostics,
            PropertyTableConfig::default().with_max_template_depth(3),
        )
        .unwrap();
        assert!(matches!(
            bounded.get("Deep"),
            Err(Error::RecursionLimit(3))
        ));

        let unbounded = PropertyTable::new(&block, Some(table), &diagnostics).unwrap();
        assert_eq!(unbounded.get("Deep").unwrap(), Some(&PropertyValue::Int(7)));
    }

    #[test]
    fn test_empty_table() {
        let table = PropertyTable::empty();
        assert!(table.is_empty());
        assert!(table.element().is_none());
        assert!(table.template().is_none());
        assert_eq!(table.get("Anything").unwrap(), None);
        assert!(table.unparsed_properties().unwrap().is_empty());
    }

    #[test]
    fn test_decode_error_is_not_cached() {
        let block = property_block([text_property("Diffuse", "ColorRGB", &["1.0"])]);
        let diagnostics = Diagnostics::new();
        let table = PropertyTable::new(&block, None, &diagnostics).unwrap();

        assert!(matches!(
            table.get("Diffuse"),
            Err(Error::NotEnoughTokens { .. })
        ));
        assert!(!table.is_cached("Diffuse"));
        assert!(table.get("Diffuse").is_err());
    }
}
