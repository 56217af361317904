// crates/form-logic/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared predicates and result helpers for requirement tests.
// ============================================================================
//! ## Overview
//! A string-flag predicate and a `TestResult` alias shared by the
//! requirement integration tests.

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

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use form_logic::PredicateEval;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across requirement integration tests.
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
// Flag Predicate
// ========================================================================

/// Predicate satisfied when its name is present in a [`FlagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag(pub &'static str);

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Set of raised flags.
#[derive(Debug, Default)]
pub struct FlagSet(pub Vec<&'static str>);

impl FlagSet {
    /// Builds a set from the given names.
    pub fn of(names: &[&'static str]) -> Self {
        Self(names.to_vec())
    }
}

impl PredicateEval for Flag {
    type Reader<'a> = FlagSet;

    fn eval(&self, reader: &FlagSet) -> bool {
        reader.0.contains(&self.0)
    }
}

/// Resolver mapping each name to its flag.
pub fn resolver(names: &[&'static str]) -> BTreeMap<String, Flag> {
    names.iter().map(|name| ((*name).to_string(), Flag(name))).collect()
}
