// crates/user-search-core/src/interfaces/mod.rs
// ============================================================================
// Module: User Search Interfaces
// Description: Pluggable field validation and event recording.
// Purpose: Define the seams the engine calls without knowing implementations.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! Interfaces let deployments decide what "filled in" means for a field and
//! where engine events go. Implementations must be deterministic: the engine
//! re-runs validators every time it recomputes readiness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::FieldValue;
use crate::core::FormEvent;

// ============================================================================
// SECTION: Field Validation
// ============================================================================

/// A value rejected by a [`FieldValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{validator}: {reason}")]
pub struct ValidationError {
    /// Name of the validator that rejected the value.
    pub validator: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(validator: &'static str, reason: impl Into<String>) -> Self {
        Self {
            validator,
            reason: reason.into(),
        }
    }
}

/// Format rule applied to a field value.
///
/// Validators never block edits; a failing value simply does not count
/// towards its category's requirement.
pub trait FieldValidator: Send + Sync {
    /// Stable validator name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Checks a non-empty value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the value does not match the rule.
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError>;
}

// ============================================================================
// SECTION: Event Recording
// ============================================================================

/// Destination for [`FormEvent`] records.
pub trait FormEventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: &FormEvent);
}
