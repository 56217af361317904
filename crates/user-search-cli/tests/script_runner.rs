// crates/user-search-cli/tests/script_runner.rs
// ============================================================================
// Module: Script Runner Tests
// Description: Session script parsing and step execution.
// Purpose: Confirm scripts drive the engine and stop at the first failure.
// Dependencies: user-search-cli, user-search-core
// ============================================================================
//! ## Overview
//! Scripts are parsed from JSON literals and replayed against fresh engines.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use user_search_cli::Script;
use user_search_cli::ScriptError;
use user_search_cli::StepAction;
use user_search_cli::run_script;
use user_search_cli::script::MAX_SCRIPT_BYTES;
use user_search_core::FieldName;
use user_search_core::FormStateEngine;
use user_search_core::SsnFormatValidator;
use user_search_core::ValidatorSet;
use user_search_core::fields;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn parse(json: &str) -> Script {
    Script::from_json(json.as_bytes()).expect("parse script")
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn parses_tagged_steps_with_expected_errors() {
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID"]},
            {"action": "fill_number", "field": "age", "value": 30, "expect_error": "unknown_field"},
            {"action": "expect_next", "enabled": false}
        ]}"#,
    );

    assert_eq!(script.steps.len(), 3);
    assert_eq!(
        script.steps[0].action,
        StepAction::Select {
            categories: vec!["ID".to_string()],
        }
    );
    assert_eq!(script.steps[1].expect_error.as_deref(), Some("unknown_field"));
    assert!(script.steps[2].expect_error.is_none());
}

#[test]
fn rejects_unknown_actions() {
    let err = Script::from_json(br#"{"steps": [{"action": "submit"}]}"#).unwrap_err();
    assert!(matches!(err, ScriptError::Parse(_)));
}

#[test]
fn rejects_oversized_scripts() {
    let bytes = vec![b' '; MAX_SCRIPT_BYTES + 1];
    let err = Script::from_json(&bytes).unwrap_err();
    assert!(matches!(err, ScriptError::TooLarge { .. }));
}

// ============================================================================
// SECTION: Execution
// ============================================================================

#[test]
fn passing_script_reports_readiness() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["Personal Info"]},
            {"action": "expect_visible", "field": "education_level", "visible": true},
            {"action": "fill", "field": "first_name", "value": "Ada"},
            {"action": "fill", "field": "last_name", "value": "Lovelace"},
            {"action": "fill", "field": "address", "value": "12 St James's Square"},
            {"action": "fill_number", "field": "age", "value": 36},
            {"action": "education", "level": "College"},
            {"action": "expect_next", "enabled": true}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(report.passed, "failure: {:?}", report.failure);
    assert_eq!(report.steps_run, 8);
    assert!(report.readiness.submit_enabled);
}

#[test]
fn stops_at_first_failed_expectation() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID"]},
            {"action": "expect_next", "enabled": true},
            {"action": "fill", "field": "ssn", "value": "123-45-6789"}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(!report.passed);
    assert_eq!(report.steps_run, 2);
    let failure = report.failure.expect("failure");
    assert_eq!(failure.step, 1);
    assert!(failure.message.contains("enabled=true"));
    assert!(engine.field_value(&FieldName::new(fields::SSN)).is_none());
}

#[test]
fn expected_error_turns_rejection_into_pass() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": [], "expect_error": "empty_selection"},
            {"action": "select", "categories": ["Astrology"], "expect_error": "invalid_category"},
            {"action": "fill", "field": "ssn", "value": "1", "expect_error": "unknown_field"},
            {"action": "select", "categories": ["ID"]},
            {"action": "select", "categories": ["ID"], "expect_error": "already_selected"},
            {"action": "deselect", "categories": ["Contact Info"], "expect_error": "not_selected"},
            {"action": "expect_next", "enabled": false}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(report.passed, "failure: {:?}", report.failure);
}

#[test]
fn mismatched_error_kind_fails() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID"]},
            {"action": "education", "level": "College", "expect_error": "invalid_education_level"}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    let failure = report.failure.expect("failure");
    assert_eq!(failure.step, 1);
    assert_eq!(failure.message, "expected error invalid_education_level, found unknown_field");
}

#[test]
fn unexpected_success_fails() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID"], "expect_error": "invalid_category"}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(!report.passed);
    assert!(report.failure.expect("failure").message.contains("step succeeded"));
}

#[test]
fn expect_error_on_expectation_step_fails() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "expect_next", "enabled": false, "expect_error": "unknown_field"}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(!report.passed);
    assert_eq!(report.steps_run, 1);
}

#[test]
fn deselect_and_clear_update_readiness() {
    let mut engine = FormStateEngine::standard();
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID", "Contact Info"]},
            {"action": "fill", "field": "ssn", "value": "123-45-6789"},
            {"action": "fill", "field": "email", "value": "ada@example.com"},
            {"action": "expect_next", "enabled": true},
            {"action": "clear", "field": "email"},
            {"action": "expect_next", "enabled": false},
            {"action": "deselect", "categories": ["Contact Info"]},
            {"action": "expect_visible", "field": "email", "visible": false},
            {"action": "expect_next", "enabled": true}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(report.passed, "failure: {:?}", report.failure);
    assert_eq!(report.readiness.categories.len(), 1);
}

#[test]
fn validators_shape_script_outcome() {
    let validators = ValidatorSet::new().with(FieldName::new(fields::SSN), SsnFormatValidator);
    let mut engine = FormStateEngine::standard().with_validators(validators);
    let script = parse(
        r#"{"steps": [
            {"action": "select", "categories": ["ID"]},
            {"action": "fill", "field": "ssn", "value": "123456789"},
            {"action": "expect_next", "enabled": false}
        ]}"#,
    );

    let report = run_script(&mut engine, &script);

    assert!(report.passed, "failure: {:?}", report.failure);
    let id = &report.readiness.categories[0];
    assert_eq!(id.invalid, vec![FieldName::new(fields::SSN)]);
}
