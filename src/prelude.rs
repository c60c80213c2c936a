//! # fbxprops Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the fbxprops library. Import this module to get quick access to everything
//! needed to build and query property tables.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all fbxprops operations
pub use crate::Error;

/// The result type used throughout fbxprops
pub use crate::Result;

/// Diagnostics collected while building tables
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Document Model
// ================================================================================================

/// Records and tokens of a parsed document
pub use crate::document::{Element, Scope, SourceLocation, Token, TokenData};

// ================================================================================================
// Properties
// ================================================================================================

/// Property tables and their configuration
pub use crate::properties::{PropertyTable, PropertyTableConfig, PropertyTableRc};

/// Decoded values and typed conversion
pub use crate::properties::{Color4, FromPropertyValue, PropertyKind, PropertyValue, Vector3};

/// Type tag dispatch
pub use crate::properties::{decode_property, PropertyType, PROPERTY_TYPES};
