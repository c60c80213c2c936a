//! Typed FBX properties: decoding and lazily evaluated property tables.
//!
//! # Architecture
//!
//! The module is layered, leaves first:
//!
//! - [`TokenReader`] - Fixed-position typed reads from a `P` record, enforcing the
//!   minimum token count of the shape being decoded
//! - [`decode_property`] - Type tag dispatch through [`PROPERTY_TYPES`] into a
//!   [`PropertyValue`]
//! - [`PropertyTable`] - Name index over a node's `P` records with a decode-once cache
//!   and template fallback
//!
//! # Usage Examples
//!
//! ```rust
//! use fbxprops::{Diagnostics, Element, PropertyTable, Scope, Token, Vector3};
//!
//! let rotation = Element::new("P").with_tokens([
//!     Token::binary_string("Lcl Rotation", 0x40),
//!     Token::binary_string("Lcl Rotation", 0x51),
//!     Token::binary_string("", 0x62),
//!     Token::binary_string("A", 0x67),
//!     Token::binary_f64(0.0, 0x6d),
//!     Token::binary_f64(90.0, 0x76),
//!     Token::binary_f64(0.0, 0x7f),
//! ]);
//! let block = Element::new("Properties70").with_scope(Scope::new().with_element(rotation));
//!
//! let diagnostics = Diagnostics::new();
//! let table = PropertyTable::new(&block, None, &diagnostics)?;
//! let rotation: Vector3 = table.get_or("Lcl Rotation", Vector3::default())?;
//! assert_eq!(rotation, Vector3::new(0.0, 90.0, 0.0));
//! # Ok::<(), fbxprops::Error>(())
//! ```

mod config;
mod decoder;
mod reader;
mod table;
mod value;

pub use config::PropertyTableConfig;
pub use decoder::{decode_property, property_type, PropertyType, PROPERTY_TYPES};
pub use reader::TokenReader;
pub use table::{PropertyTable, PropertyTableRc, PROPERTY_KEY};
pub use value::{Color4, FromPropertyValue, PropertyKind, PropertyValue, Vector3};
