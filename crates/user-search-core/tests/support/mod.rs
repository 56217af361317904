// crates/user-search-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared engine builders and result helpers for form tests.
// ============================================================================
//! ## Overview
//! Engine constructors and a `TestResult` alias shared by the user search
//! integration tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use user_search_core::FieldName;
use user_search_core::FormStateEngine;
use user_search_core::MemoryEventSink;
use user_search_core::ValidatorSet;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across form integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Engine Builders
// ========================================================================

/// Standard catalog, no validators.
pub fn engine() -> FormStateEngine {
    FormStateEngine::standard()
}

/// Standard catalog with the SSN format rule.
pub fn validated_engine() -> FormStateEngine {
    FormStateEngine::standard().with_validators(ValidatorSet::standard())
}

/// Standard catalog recording events in memory.
pub fn traced_engine() -> (FormStateEngine, Arc<MemoryEventSink>) {
    let sink = Arc::new(MemoryEventSink::new());
    let engine = FormStateEngine::standard().with_event_sink(sink.clone());
    (engine, sink)
}

/// Shorthand for a field identifier.
pub fn field(name: &str) -> FieldName {
    FieldName::new(name)
}
