// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # fbxprops
//!
//! Lazily evaluated, typed property tables for FBX documents.
//!
//! Every object in an FBX file (models, materials, cameras, animation curves) carries a
//! block of `P` records: a name, a type tag, a label, flags and one or more values.
//! `fbxprops` turns such a block into a [`PropertyTable`] that decodes each record the
//! first time it is asked for, remembers the outcome, and falls back to a shared
//! template table for names the object does not define itself.
//!
//! ## Features
//!
//! - **Decode on demand** - Building a table only indexes names; values are decoded on first lookup
//! - **Decode once** - Every outcome is cached, including records that decode to nothing
//! - **Template fallback** - Object-type defaults are shared between tables through [`std::sync::Arc`]
//! - **Exact type vocabulary** - One static table maps every known type tag to its value shape
//! - **Lenient by default** - Stray or duplicate records are reported through [`Diagnostics`], not errors
//!
//! ## Quick Start
//!
//! ```rust
//! use fbxprops::prelude::*;
//!
//! let block = Element::new("Properties70").with_scope(
//!     Scope::new().with_element(Element::new("P").with_tokens([
//!         Token::text("\"Visibility\"", 3),
//!         Token::text("\"bool\"", 3),
//!         Token::text("\"\"", 3),
//!         Token::text("\"A\"", 3),
//!         Token::text("1", 3),
//!     ])),
//! );
//!
//! let diagnostics = Diagnostics::new();
//! let table = PropertyTable::new(&block, None, &diagnostics)?;
//! assert_eq!(table.get("Visibility")?, Some(&PropertyValue::Bool(true)));
//! assert!(table.get_or("Visibility", false)?);
//! # Ok::<(), fbxprops::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`document`] - Elements, scopes and tokens as produced by the FBX tokenizers
//! - [`properties`] - Token reader, type tag decoder and property tables
//! - [`diagnostics`] - Collection of non-fatal findings
//! - [`Error`] and [`Result`] - Fatal decode and construction errors
//!
//! ## Error Handling
//!
//! A property with a known type tag but too few tokens cannot be recovered and is
//! reported as [`Error::NotEnoughTokens`], citing a byte offset for binary files and a
//! line number for text files. Unknown type tags are not errors; they decode to `None`
//! so callers can apply their own default.
//!
//! ## Logging
//!
//! Diagnostics are forwarded to the [`log`] facade as they are recorded. The crate
//! never installs a logger.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Diagnostics collected while building property tables.
pub mod diagnostics;

/// In-memory model of a tokenized FBX document.
///
/// # Key Types
///
/// - [`document::Element`] - A record: key, tokens and optional children
/// - [`document::Scope`] - Ordered children of an element
/// - [`document::Token`] - A lexical unit with typed parse helpers
pub mod document;

/// Typed property decoding and lazily evaluated property tables.
///
/// # Key Types
///
/// - [`properties::PropertyTable`] - Decode-once name index with template fallback
/// - [`properties::PropertyValue`] - The closed set of decoded value shapes
/// - [`properties::PROPERTY_TYPES`] - Type tag vocabulary
pub mod properties;

/// `fbxprops` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `fbxprops` Error type
///
/// Covers decode failures, construction failures and template depth limits.
pub use error::Error;

pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
pub use document::{Element, Scope, SourceLocation, Token, TokenData};
pub use properties::{
    decode_property, Color4, FromPropertyValue, PropertyKind, PropertyTable, PropertyTableConfig,
    PropertyTableRc, PropertyValue, Vector3, PROPERTY_TYPES,
};
