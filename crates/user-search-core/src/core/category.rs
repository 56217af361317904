// crates/user-search-core/src/core/category.rs
// ============================================================================
// Module: User Search Categories
// Description: The enumerated set of selectable information categories.
// Purpose: Parse category labels and expose stable identifiers.
// Dependencies: serde, crate::core::error
// ============================================================================

//! ## Overview
//! Categories parse from their display label (`Personal Info`, as shown in
//! the dropdown) or their snake identifier (`personal_info`, as used in
//! config and scripts). Anything else is [`FormError::InvalidCategory`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::FormError;

/// Selectable information category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Identity number (SSN).
    Id,
    /// Name, address, age, and education.
    PersonalInfo,
    /// Name, job, and favorites.
    GeneralInfo,
    /// Phone or email.
    ContactInfo,
}

impl Category {
    /// Every category in dropdown order.
    pub const ALL: [Self; 4] = [Self::Id, Self::PersonalInfo, Self::GeneralInfo, Self::ContactInfo];

    /// Returns the dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::PersonalInfo => "Personal Info",
            Self::GeneralInfo => "General Info",
            Self::ContactInfo => "Contact Info",
        }
    }

    /// Returns the snake-case identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::PersonalInfo => "personal_info",
            Self::GeneralInfo => "general_info",
            Self::ContactInfo => "contact_info",
        }
    }

    /// Parses a label or identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidCategory`] when `value` names no category.
    pub fn parse(value: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value || category.id() == value)
            .ok_or_else(|| FormError::InvalidCategory(value.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
