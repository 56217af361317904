// crates/user-search-core/src/core/value.rs
// ============================================================================
// Module: User Search Field Values
// Description: Raw field input values.
// Purpose: Represent user input without validating its format.
// Dependencies: serde, crate::core::error
// ============================================================================

//! ## Overview
//! [`FieldValue`] is deliberately permissive: any text is accepted, and format
//! rules live in [`FieldValidator`](crate::interfaces::FieldValidator)
//! implementations. Only `Text("")` counts as empty.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::FormError;

/// Option offered by the Education Level dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// High School.
    HighSchool,
    /// College.
    College,
    /// Advanced Degree.
    AdvancedDegree,
}

impl EducationLevel {
    /// Every option in dropdown order.
    pub const ALL: [Self; 3] = [Self::HighSchool, Self::College, Self::AdvancedDegree];

    /// Returns the dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::College => "College",
            Self::AdvancedDegree => "Advanced Degree",
        }
    }

    /// Returns the snake-case identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::College => "college",
            Self::AdvancedDegree => "advanced_degree",
        }
    }

    /// Parses a label or identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidEducationLevel`] for anything else.
    pub fn parse(value: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|level| level.label() == value || level.id() == value)
            .ok_or_else(|| FormError::InvalidEducationLevel(value.to_string()))
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw value held by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// Whole number, as typed into a numeric input.
    Number(i64),
    /// Education Level choice.
    Choice(EducationLevel),
}

impl FieldValue {
    /// Returns `true` for empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Returns the text form the value would have in an input element.
    #[must_use]
    pub fn as_input_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Choice(level) => level.label().to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<EducationLevel> for FieldValue {
    fn from(value: EducationLevel) -> Self {
        Self::Choice(value)
    }
}
