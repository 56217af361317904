// crates/user-search-core/src/core/identifiers.rs
// ============================================================================
// Module: User Search Identifiers
// Description: Opaque identifiers for form fields.
// Purpose: Provide a strongly typed, serializable field key.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Field identifiers are snake-case strings such as `first_name`. They are
//! opaque; the catalog decides which identifiers exist.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Identifier of a form field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a new field identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
