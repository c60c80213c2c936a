//! In-memory model of a tokenized FBX document.
//!
//! The tokenizers and the DOM parser populate these types; the property system only
//! reads them. A document tree always outlives the property tables built over it,
//! which is expressed through the `'doc` lifetime on [`crate::PropertyTable`].
//!
//! # Key Components
//!
//! - [`Element`] - A record: key, tokens and optional children
//! - [`Scope`] - Ordered children of an element
//! - [`Token`] - A lexical unit with typed parse helpers
//! - [`SourceLocation`] - Byte offset or line number of a token

mod element;
mod token;

pub use element::{Element, Scope};
pub use token::{SourceLocation, Token, TokenData};
