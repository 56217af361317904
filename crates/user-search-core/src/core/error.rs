// crates/user-search-core/src/core/error.rs
// ============================================================================
// Module: User Search Errors
// Description: Precondition failures of form-state operations.
// Purpose: Give callers a typed, loggable reason for every rejected call.
// Dependencies: thiserror, crate::core::{category, identifiers}
// ============================================================================

//! ## Overview
//! Every [`FormError`] is scoped to the single call that raised it; the
//! engine state is unchanged when an operation returns an error.

use thiserror::Error;

use crate::core::category::Category;
use crate::core::identifiers::FieldName;

/// Rejected form-state operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The category label is unknown or the catalog does not offer it.
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    /// The category is already selected.
    #[error("category already selected: {0}")]
    AlreadySelected(Category),
    /// The category is not selected.
    #[error("category not selected: {0}")]
    NotSelected(Category),
    /// The field is not currently visible.
    #[error("unknown field: {0}")]
    UnknownField(FieldName),
    /// The education level is not one of the offered options.
    #[error("invalid education level: {0}")]
    InvalidEducationLevel(String),
}

impl FormError {
    /// Returns a stable label for logs and scripts.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCategory(_) => "invalid_category",
            Self::AlreadySelected(_) => "already_selected",
            Self::NotSelected(_) => "not_selected",
            Self::UnknownField(_) => "unknown_field",
            Self::InvalidEducationLevel(_) => "invalid_education_level",
        }
    }
}
