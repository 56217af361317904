// crates/user-search-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starting point for operators and tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example spells out every setting with its default value, plus one
//! commented catalog override.

/// Returns a canonical example `user-search.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[validation]
ssn_format = true
email_format = false
phone_format = false
max_value_length = 256

[events]
sink = "none"
# path = "user-search-events.jsonl"

# Require both contact methods instead of either one.
# [[catalog]]
# category = "contact_info"
# requirement = "phone && email"
"#,
    )
}
