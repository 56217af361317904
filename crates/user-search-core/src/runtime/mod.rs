// crates/user-search-core/src/runtime/mod.rs
// ============================================================================
// Module: User Search Runtime
// Description: Form-state engine, readiness, validators, sinks, page object.
// Purpose: Execute form-state operations over the catalog.
// Dependencies: crate::{core, interfaces}, form-logic
// ============================================================================

//! ## Overview
//! Runtime modules mutate and evaluate form state. Every caller, including
//! the page object and the CLI, goes through [`FormStateEngine`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod events;
pub mod page;
pub mod readiness;
pub mod validators;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::FormStateEngine;
pub use events::FileEventSink;
pub use events::MemoryEventSink;
pub use events::NoopEventSink;
pub use events::StderrEventSink;
pub use events::TeeEventSink;
pub use page::ButtonState;
pub use page::PageError;
pub use page::UserSearchPage;
pub use page::Visibility;
pub use readiness::CategoryReadiness;
pub use readiness::FieldSnapshot;
pub use readiness::ReadinessReport;
pub use validators::EmailFormatValidator;
pub use validators::MaxLengthValidator;
pub use validators::PhoneFormatValidator;
pub use validators::SsnFormatValidator;
pub use validators::ValidatorSet;
