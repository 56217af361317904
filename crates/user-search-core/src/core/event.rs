// crates/user-search-core/src/core/event.rs
// ============================================================================
// Module: User Search Form Events
// Description: Structured records of form-state mutations.
// Purpose: Give sinks a redacted, serializable view of every engine call.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FormEvent`] is produced for every mutating engine call, whether it was
//! applied or rejected. Field values are never included; the `redaction`
//! marker says so explicitly in every record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::category::Category;
use crate::core::error::FormError;
use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Engine operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormAction {
    /// Category selected.
    SelectCategory,
    /// Category deselected.
    DeselectCategory,
    /// Field value set.
    SetFieldValue,
    /// Field value removed.
    ClearField,
    /// Education level chosen.
    SelectEducationLevel,
    /// Engine returned to its empty state.
    Reset,
}

/// Whether the operation changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEventOutcome {
    /// State was updated.
    Applied,
    /// A precondition failed; state is unchanged.
    Rejected,
}

/// Redaction marker carried by every event.
pub const VALUES_OMITTED: &str = "values_omitted";

/// Form-state event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormEvent {
    /// Operation performed.
    pub event: FormAction,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Category involved, when any.
    pub category: Option<Category>,
    /// Field involved, when any.
    pub field: Option<FieldName>,
    /// Operation outcome.
    pub outcome: FormEventOutcome,
    /// Error kind label when rejected.
    pub error_kind: Option<&'static str>,
    /// Next button state after the operation.
    pub submit_enabled: bool,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

impl FormEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(
        event: FormAction,
        category: Option<Category>,
        field: Option<FieldName>,
        error: Option<&FormError>,
        submit_enabled: bool,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            category,
            field,
            outcome: if error.is_some() {
                FormEventOutcome::Rejected
            } else {
                FormEventOutcome::Applied
            },
            error_kind: error.map(FormError::kind),
            submit_enabled,
            redaction: VALUES_OMITTED,
        }
    }
}
