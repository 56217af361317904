// crates/user-search-core/src/core/mod.rs
// ============================================================================
// Module: User Search Core Types
// Description: Categories, fields, values, catalog, events, and errors.
// Purpose: Group the data model shared by the runtime and its callers.
// Dependencies: crate::core::*
// ============================================================================

//! ## Overview
//! Plain data types. Nothing in this module mutates form state; see
//! [`crate::runtime`] for the engine.

pub mod catalog;
pub mod category;
pub mod error;
pub mod event;
pub mod identifiers;
pub mod value;

pub use catalog::CatalogError;
pub use catalog::CategorySpec;
pub use catalog::FieldCatalog;
pub use catalog::FieldKind;
pub use catalog::FieldRole;
pub use catalog::FieldSpec;
pub use catalog::fields;
pub use category::Category;
pub use error::FormError;
pub use event::FormAction;
pub use event::FormEvent;
pub use event::FormEventOutcome;
pub use identifiers::FieldName;
pub use value::EducationLevel;
pub use value::FieldValue;
