// crates/user-search-config/src/lib.rs
// ============================================================================
// Module: User Search Config Library
// Description: Config model, validation, and engine assembly.
// Purpose: Single source of truth for user-search.toml semantics.
// Dependencies: user-search-core, form-logic, serde, toml
// ============================================================================

//! ## Overview
//! `user-search-config` reads `user-search.toml`, validates it fail-closed,
//! and assembles a [`user_search_core::FormStateEngine`] with the configured
//! validators, event sink, and catalog overrides.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
