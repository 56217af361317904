// crates/user-search-core/src/lib.rs
// ============================================================================
// Module: User Search Core Library
// Description: Public API surface for the user search form-state engine.
// Purpose: Expose catalog types, interfaces, and the runtime engine.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The user search form lets a person pick information categories (ID,
//! Personal Info, General Info, Contact Info). Each category reveals fields,
//! some required, and the form's Next button is enabled only while every
//! selected category's requirement holds. This crate owns that state model:
//! category selection, field visibility, field values, and submit readiness.
//! Rendering and browser automation live outside it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::FieldValidator;
pub use interfaces::FormEventSink;
pub use interfaces::ValidationError;
pub use runtime::ButtonState;
pub use runtime::CategoryReadiness;
pub use runtime::EmailFormatValidator;
pub use runtime::FieldSnapshot;
pub use runtime::FileEventSink;
pub use runtime::FormStateEngine;
pub use runtime::MaxLengthValidator;
pub use runtime::MemoryEventSink;
pub use runtime::NoopEventSink;
pub use runtime::PageError;
pub use runtime::PhoneFormatValidator;
pub use runtime::ReadinessReport;
pub use runtime::SsnFormatValidator;
pub use runtime::StderrEventSink;
pub use runtime::TeeEventSink;
pub use runtime::UserSearchPage;
pub use runtime::ValidatorSet;
pub use runtime::Visibility;
