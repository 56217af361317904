// crates/user-search-cli/src/script.rs
// ============================================================================
// Module: Session Scripts
// Description: JSON session scripts and their step-by-step runner.
// Purpose: Drive a form-state engine from a file and report the outcome.
// Dependencies: user-search-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A script is a list of steps. Mutating steps call the engine through the
//! page object; expectation steps compare the page against a stated outcome.
//! A mutating step may name the error kind it expects, which turns a
//! rejection into a pass. Execution stops at the first failed step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use user_search_core::ButtonState;
use user_search_core::FieldName;
use user_search_core::FieldValue;
use user_search_core::FormStateEngine;
use user_search_core::ReadinessReport;
use user_search_core::UserSearchPage;
use user_search_core::Visibility;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum script size in bytes.
pub const MAX_SCRIPT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Script Model
// ============================================================================

/// Session script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] when the input is too large or malformed.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ScriptError> {
        if bytes.len() > MAX_SCRIPT_BYTES {
            return Err(ScriptError::TooLarge {
                max_bytes: MAX_SCRIPT_BYTES,
                actual_bytes: bytes.len(),
            });
        }
        serde_json::from_slice(bytes).map_err(|err| ScriptError::Parse(err.to_string()))
    }
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// What to do.
    #[serde(flatten)]
    pub action: StepAction,
    /// Error kind the step is expected to raise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,
}

/// Step actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Pick categories from the dropdown.
    Select {
        /// Category labels.
        categories: Vec<String>,
    },
    /// Unpick categories from the dropdown.
    Deselect {
        /// Category labels.
        categories: Vec<String>,
    },
    /// Type text into a field.
    Fill {
        /// Field identifier.
        field: String,
        /// Text to type.
        value: String,
    },
    /// Type a number into a field.
    FillNumber {
        /// Field identifier.
        field: String,
        /// Number to type.
        value: i64,
    },
    /// Pick an Education Level option.
    Education {
        /// Option label or identifier.
        level: String,
    },
    /// Empty a field.
    Clear {
        /// Field identifier.
        field: String,
    },
    /// Check the Next button.
    ExpectNext {
        /// Whether the button should be enabled.
        enabled: bool,
    },
    /// Check whether a field is shown.
    ExpectVisible {
        /// Field identifier.
        field: String,
        /// Whether the field should be shown.
        visible: bool,
    },
}

impl StepAction {
    /// Returns `true` for steps that change form state.
    const fn is_mutation(&self) -> bool {
        !matches!(self, Self::ExpectNext { .. } | Self::ExpectVisible { .. })
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Script loading failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Script exceeds the size limit.
    #[error("script exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum accepted size.
        max_bytes: usize,
        /// Size encountered.
        actual_bytes: usize,
    },
    /// Script is not valid JSON for the step model.
    #[error("script parse error: {0}")]
    Parse(String),
}

/// First failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    /// Zero-based step index.
    pub step: usize,
    /// What went wrong.
    pub message: String,
}

/// Outcome of running a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    /// Whether every step passed.
    pub passed: bool,
    /// Steps executed, including the failed one.
    pub steps_run: usize,
    /// First failure, when any.
    pub failure: Option<StepFailure>,
    /// Readiness after the last executed step.
    pub readiness: ReadinessReport,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs `script` against `engine`, stopping at the first failure.
#[must_use]
pub fn run_script(engine: &mut FormStateEngine, script: &Script) -> ScriptReport {
    let mut steps_run = 0;
    let mut failure = None;
    for (index, step) in script.steps.iter().enumerate() {
        steps_run += 1;
        if let Err(message) = run_step(engine, step) {
            failure = Some(StepFailure {
                step: index,
                message,
            });
            break;
        }
    }
    ScriptReport {
        passed: failure.is_none(),
        steps_run,
        failure,
        readiness: engine.readiness(),
    }
}

/// Runs one step, returning a failure message.
fn run_step(engine: &mut FormStateEngine, step: &Step) -> Result<(), String> {
    if step.expect_error.is_some() && !step.action.is_mutation() {
        return Err("expect_error is only valid on mutating steps".to_string());
    }
    let outcome: Result<(), &'static str> = match &step.action {
        StepAction::Select {
            categories,
        } => UserSearchPage::new(engine)
            .select_categories(&labels(categories))
            .map_err(|err| err.kind()),
        StepAction::Deselect {
            categories,
        } => UserSearchPage::new(engine)
            .deselect_categories(&labels(categories))
            .map_err(|err| err.kind()),
        StepAction::Fill {
            field,
            value,
        } => set(engine, field, FieldValue::from(value.as_str())),
        StepAction::FillNumber {
            field,
            value,
        } => set(engine, field, FieldValue::Number(*value)),
        StepAction::Education {
            level,
        } => UserSearchPage::new(engine).select_education_level(level).map_err(|err| err.kind()),
        StepAction::Clear {
            field,
        } => engine.clear_field(&FieldName::new(field.as_str())).map_err(|err| err.kind()),
        StepAction::ExpectNext {
            enabled,
        } => {
            let actual = UserSearchPage::new(engine).next_button() == ButtonState::Enabled;
            return expect(actual == *enabled, || {
                format!("expected next enabled={enabled}, found enabled={actual}")
            });
        }
        StepAction::ExpectVisible {
            field,
            visible,
        } => {
            let actual = UserSearchPage::new(engine).field(field) == Visibility::Visible;
            return expect(actual == *visible, || {
                format!("expected {field} visible={visible}, found visible={actual}")
            });
        }
    };
    match (outcome, step.expect_error.as_deref()) {
        (Ok(()), None) => Ok(()),
        (Ok(()), Some(expected)) => Err(format!("expected error {expected}, step succeeded")),
        (Err(kind), Some(expected)) if kind == expected => Ok(()),
        (Err(kind), Some(expected)) => Err(format!("expected error {expected}, found {kind}")),
        (Err(kind), None) => Err(format!("unexpected error {kind}")),
    }
}

/// Stores a value through the engine.
fn set(engine: &mut FormStateEngine, field: &str, value: FieldValue) -> Result<(), &'static str> {
    engine.set_field_value(&FieldName::new(field), value).map_err(|err| err.kind())
}

/// Borrows owned labels for the page object.
fn labels(categories: &[String]) -> Vec<&str> {
    categories.iter().map(String::as_str).collect()
}

/// Turns a boolean check into a step result.
fn expect(holds: bool, message: impl FnOnce() -> String) -> Result<(), String> {
    if holds { Ok(()) } else { Err(message()) }
}
