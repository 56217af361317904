// crates/form-logic/src/error.rs
// ============================================================================
// Module: Requirement Error Definitions
// Description: Structured diagnostics for unsatisfied requirements.
// Purpose: Explain why a requirement tree did not hold, for logs and UIs.
// Dependencies: serde::{Serialize, Deserialize}, std::fmt
// ============================================================================

//! ## Overview
//! [`RequirementError`] is produced by
//! [`Requirement::check`](crate::requirement::Requirement::check) and carries
//! the first failing branch of a requirement tree. It keeps a technical
//! `Display` form and a separate [`RequirementError::user_message`] for
//! end-user copy.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Reasons a requirement tree was not satisfied.
///
/// # Invariants
/// - None. Variants capture structured evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequirementError {
    // ============================================================================
    // SECTION: Logical Composition Errors
    // ============================================================================
    /// Not enough members of an `at_least` group held.
    GroupRequirementFailed {
        /// How many members held.
        passed: usize,
        /// How many members were needed.
        required: usize,
    },

    /// No alternative of an `any` clause held.
    OrAllFailed {
        /// Leaves of the alternatives, rendered for display.
        alternatives: Vec<String>,
    },

    /// The inner requirement of a `not` clause held.
    NotFailed,

    // ============================================================================
    // SECTION: Leaf Errors
    // ============================================================================
    /// A single predicate did not hold.
    PredicateFailed {
        /// The predicate, rendered for display.
        predicate: String,
    },
}

// ============================================================================
// SECTION: Display Implementation
// ============================================================================

impl fmt::Display for RequirementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupRequirementFailed {
                passed,
                required,
            } => {
                write!(f, "group requirement failed: passed {passed}, needed {required}")
            }
            Self::OrAllFailed {
                alternatives,
            } => {
                write!(f, "no alternative satisfied: {}", alternatives.join(" | "))
            }
            Self::NotFailed => write!(f, "negated requirement was satisfied"),
            Self::PredicateFailed {
                predicate,
            } => write!(f, "predicate not satisfied: {predicate}"),
        }
    }
}

impl std::error::Error for RequirementError {}

// ============================================================================
// SECTION: Convenience Helpers
// ============================================================================

impl RequirementError {
    /// Returns a message suitable for showing to the person filling the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::GroupRequirementFailed {
                passed,
                required,
            } => {
                let remaining = required.saturating_sub(*passed);
                format!(
                    "Fill in {} more field{}",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                )
            }
            Self::OrAllFailed {
                alternatives,
            } => format!("Fill in one of: {}", alternatives.join(", ")),
            Self::NotFailed => "A field that must stay empty has a value".to_string(),
            Self::PredicateFailed {
                predicate,
            } => format!("{predicate} is required"),
        }
    }

    /// Creates a predicate failure for the given display name.
    pub fn predicate_failed(predicate: impl Into<String>) -> Self {
        Self::PredicateFailed {
            predicate: predicate.into(),
        }
    }
}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Result of checking a requirement tree.
pub type RequirementResult<T = ()> = Result<T, RequirementError>;
