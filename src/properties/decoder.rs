//! Type tag dispatch for `P` records.
//!
//! The FBX property vocabulary is fixed: a record's second token names its type, and
//! each known type tag maps onto one [`PropertyKind`]. [`PROPERTY_TYPES`] is the single
//! table describing that mapping; [`decode_property`] consults it and reads the value
//! tokens that follow the `name, type, label, flags` prefix.
//!
//! Tags are matched exactly, including case and embedded spaces. Tags missing from
//! the table decode to `None` without error so that newer exporters can introduce
//! types this crate does not know about, while a known tag with too few tokens is a
//! hard error.
//!
//! # Examples
//!
//! ```rust
//! use fbxprops::{decode_property, Element, PropertyValue, Token, Vector3};
//!
//! let element = Element::new("P").with_tokens([
//!     Token::text("\"Lcl Rotation\"", 4),
//!     Token::text("\"Vector3D\"", 4),
//!     Token::text("\"\"", 4),
//!     Token::text("\"A\"", 4),
//!     Token::text("10.0", 4),
//!     Token::text("20.0", 4),
//!     Token::text("30.0", 4),
//! ]);
//!
//! assert_eq!(
//!     decode_property(&element)?,
//!     Some(PropertyValue::Vector3(Vector3::new(10.0, 20.0, 30.0)))
//! );
//! # Ok::<(), fbxprops::Error>(())
//! ```

use std::{collections::HashMap, sync::OnceLock};

use crate::{
    document::Element,
    properties::{
        reader::{TokenReader, TYPE_INDEX, VALUE_INDEX},
        value::{Color4, PropertyKind, PropertyValue, Vector3},
    },
    Result,
};

/// A known property type tag and the shape it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyType {
    /// The exact type tag as written in the document
    pub type_name: &'static str,
    /// The decoded shape
    pub kind: PropertyKind,
}

impl PropertyType {
    /// Minimum token count for records of this type.
    #[must_use]
    pub const fn min_tokens(&self) -> usize {
        self.kind.min_tokens()
    }
}

const fn entry(type_name: &'static str, kind: PropertyKind) -> PropertyType {
    PropertyType { type_name, kind }
}

/// Every property type tag understood by [`decode_property`].
pub const PROPERTY_TYPES: &[PropertyType] = &[
    entry("KString", PropertyKind::String),
    entry("bool", PropertyKind::Bool),
    entry("Bool", PropertyKind::Bool),
    entry("int", PropertyKind::Int),
    entry("Int", PropertyKind::Int),
    entry("enum", PropertyKind::Int),
    entry("Enum", PropertyKind::Int),
    entry("Integer", PropertyKind::Int),
    entry("ULongLong", PropertyKind::ULongLong),
    entry("KTime", PropertyKind::Int64),
    entry("Vector3D", PropertyKind::Vector3),
    entry("ColorRGB", PropertyKind::Vector3),
    entry("Vector", PropertyKind::Vector3),
    entry("Color", PropertyKind::Vector3),
    entry("Lcl Translation", PropertyKind::Vector3),
    entry("Lcl Rotation", PropertyKind::Vector3),
    entry("Lcl Scaling", PropertyKind::Vector3),
    entry("double", PropertyKind::Float),
    entry("Number", PropertyKind::Float),
    entry("float", PropertyKind::Float),
    entry("Float", PropertyKind::Float),
    entry("FieldOfView", PropertyKind::Float),
    entry("UnitScaleFactor", PropertyKind::Float),
    entry("ColorAndAlpha", PropertyKind::Color4),
];

fn type_index() -> &'static HashMap<&'static str, PropertyType> {
    static INDEX: OnceLock<HashMap<&'static str, PropertyType>> = OnceLock::new();
    INDEX.get_or_init(|| {
        PROPERTY_TYPES
            .iter()
            .map(|property_type| (property_type.type_name, *property_type))
            .collect()
    })
}

/// Looks up a type tag in [`PROPERTY_TYPES`].
#[must_use]
pub fn property_type(type_name: &str) -> Option<&'static PropertyType> {
    type_index().get(type_name)
}

impl PropertyKind {
    /// Returns the shape a type tag decodes to, or `None` for unknown tags.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Option<PropertyKind> {
        property_type(type_name).map(|property_type| property_type.kind)
    }
}

/// Decodes a single `P` record into a typed value.
///
/// Returns `Ok(None)` if the record has fewer than two tokens or its type tag is not
/// in [`PROPERTY_TYPES`].
///
/// # Errors
/// Returns [`crate::Error::NotEnoughTokens`] if the tag is known but the record is
/// too short for its shape, and [`crate::Error::TokenParse`] if a value token does
/// not parse as the shape requires.
pub fn decode_property(element: &Element) -> Result<Option<PropertyValue>> {
    let Some(type_token) = element.tokens().get(TYPE_INDEX) else {
        return Ok(None);
    };

    let type_name = type_token.parse_string()?;
    let Some(kind) = PropertyKind::from_type_name(&type_name) else {
        return Ok(None);
    };

    let reader = TokenReader::new(element, kind.min_tokens())?;
    let value = match kind {
        PropertyKind::String => PropertyValue::String(reader.read_string(VALUE_INDEX)?),
        PropertyKind::Bool => PropertyValue::Bool(reader.read_bool(VALUE_INDEX)?),
        PropertyKind::Int => PropertyValue::Int(reader.read_int(VALUE_INDEX)?),
        PropertyKind::ULongLong => PropertyValue::ULongLong(reader.read_id(VALUE_INDEX)?),
        PropertyKind::Int64 => PropertyValue::Int64(reader.read_int64(VALUE_INDEX)?),
        PropertyKind::Float => PropertyValue::Float(reader.read_float(VALUE_INDEX)?),
        PropertyKind::Vector3 => PropertyValue::Vector3(Vector3::new(
            reader.read_float(VALUE_INDEX)?,
            reader.read_float(VALUE_INDEX + 1)?,
            reader.read_float(VALUE_INDEX + 2)?,
        )),
        PropertyKind::Color4 => PropertyValue::Color4(Color4::new(
            reader.read_float(VALUE_INDEX)?,
            reader.read_float(VALUE_INDEX + 1)?,
            reader.read_float(VALUE_INDEX + 2)?,
            reader.read_float(VALUE_INDEX + 3)?,
        )),
    };

    Ok(Some(value))
}
