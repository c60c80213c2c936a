//! Decoded property values.
//!
//! The set of shapes a property can decode to is closed: every type tag known to the
//! decoder maps onto exactly one [`PropertyKind`], and every decoded value is a
//! [`PropertyValue`] of that kind.

use std::fmt;

use strum::{EnumCount, EnumIter};

/// A three component float vector (translation, rotation, scale, RGB colors).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }
}

/// A four component RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color4 {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color4 {
    /// Creates a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color4 { r, g, b, a }
    }
}

/// The shape a property decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum PropertyKind {
    /// UTF-8 string
    String,
    /// Boolean flag, stored as an integer in the document
    Bool,
    /// Signed 32-bit integer (also used for enums)
    Int,
    /// Unsigned 64-bit object id
    ULongLong,
    /// Signed 64-bit integer, used for `KTime` timestamps
    Int64,
    /// Single precision float
    Float,
    /// Three float vector
    Vector3,
    /// Four float RGBA color
    Color4,
}

impl PropertyKind {
    /// Minimum number of tokens a `P` record of this kind must carry.
    ///
    /// Every record starts with name, type tag, label and flags; scalar shapes add
    /// one value token, vectors three and colors four.
    #[must_use]
    pub const fn min_tokens(self) -> usize {
        match self {
            PropertyKind::Vector3 => 7,
            PropertyKind::Color4 => 8,
            _ => 5,
        }
    }
}

/// A decoded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `KString`
    String(String),
    /// `bool`, `Bool`
    Bool(bool),
    /// `int`, `Int`, `enum`, `Enum`, `Integer`
    Int(i32),
    /// `ULongLong`
    ULongLong(u64),
    /// `KTime`
    Int64(i64),
    /// `double`, `Number`, `float`, `Float`, `FieldOfView`, `UnitScaleFactor`
    Float(f32),
    /// `Vector3D`, `ColorRGB`, `Vector`, `Color`, `Lcl Translation`, `Lcl Rotation`, `Lcl Scaling`
    Vector3(Vector3),
    /// `ColorAndAlpha`
    Color4(Color4),
}

impl PropertyValue {
    /// Returns the shape of this value.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::ULongLong(_) => PropertyKind::ULongLong,
            PropertyValue::Int64(_) => PropertyKind::Int64,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Vector3(_) => PropertyKind::Vector3,
            PropertyValue::Color4(_) => PropertyKind::Color4,
        }
    }

    /// Returns the string, if this is a string property.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean property.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is a 32-bit integer property.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the id, if this is a `ULongLong` property.
    #[must_use]
    pub fn as_ulonglong(&self) -> Option<u64> {
        match self {
            PropertyValue::ULongLong(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is a 64-bit integer property.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float, if this is a float property.
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the vector, if this is a vector property.
    #[must_use]
    pub fn as_vector3(&self) -> Option<Vector3> {
        match self {
            PropertyValue::Vector3(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the color, if this is a color-with-alpha property.
    #[must_use]
    pub fn as_color4(&self) -> Option<Color4> {
        match self {
            PropertyValue::Color4(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(value) => write!(f, "\"{value}\""),
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Int(value) => write!(f, "{value}"),
            PropertyValue::ULongLong(value) => write!(f, "{value}"),
            PropertyValue::Int64(value) => write!(f, "{value}"),
            PropertyValue::Float(value) => write!(f, "{value}"),
            PropertyValue::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            PropertyValue::Color4(c) => write!(f, "({}, {}, {}, {})", c.r, c.g, c.b, c.a),
        }
    }
}

/// Conversion from a decoded [`PropertyValue`] into a concrete Rust type.
///
/// Conversions are exact: a value of another shape yields `None` rather than being
/// coerced, so asking for an `f32` from an `Int` property fails.
pub trait FromPropertyValue: Sized {
    /// Extracts `Self` from `value` if the shapes match.
    fn from_property_value(value: &PropertyValue) -> Option<Self>;
}

impl FromPropertyValue for String {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromPropertyValue for bool {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromPropertyValue for i32 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromPropertyValue for u64 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_ulonglong()
    }
}

impl FromPropertyValue for i64 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_int64()
    }
}

impl FromPropertyValue for f32 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromPropertyValue for Vector3 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_vector3()
    }
}

impl FromPropertyValue for Color4 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_color4()
    }
}
