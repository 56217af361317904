// crates/user-search-cli/src/lib.rs
// ============================================================================
// Module: User Search CLI Library
// Description: Shared helpers for the user search command-line interface.
// Purpose: Keep session script execution testable outside the binary.
// Dependencies: user-search-core, serde
// ============================================================================

//! ## Overview
//! Houses the session script model and runner used by `user-search run`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod script;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use script::Script;
pub use script::ScriptError;
pub use script::ScriptReport;
pub use script::Step;
pub use script::StepAction;
pub use script::StepFailure;
pub use script::run_script;
