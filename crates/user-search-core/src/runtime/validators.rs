// crates/user-search-core/src/runtime/validators.rs
// ============================================================================
// Module: User Search Field Validators
// Description: Built-in format rules and the per-field validator registry.
// Purpose: Decide whether a non-empty value counts as filled in.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! A [`ValidatorSet`] maps fields to the validators that apply to them. The
//! engine consults it while recomputing readiness; a value that fails any of
//! its field's validators is treated like an empty field. An empty set makes
//! every non-empty value acceptable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::core::FieldName;
use crate::core::FieldValue;
use crate::core::fields;
use crate::interfaces::FieldValidator;
use crate::interfaces::ValidationError;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Validators registered per field.
#[derive(Clone, Default)]
pub struct ValidatorSet {
    /// Validators keyed by field, applied in registration order.
    by_field: BTreeMap<FieldName, Vec<Arc<dyn FieldValidator>>>,
}

impl ValidatorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with the SSN format rule on the `ssn` field.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with(FieldName::new(fields::SSN), SsnFormatValidator)
    }

    /// Returns the set with `validator` added for `field`.
    #[must_use]
    pub fn with(mut self, field: FieldName, validator: impl FieldValidator + 'static) -> Self {
        self.register(field, Arc::new(validator));
        self
    }

    /// Adds a validator for `field`.
    pub fn register(&mut self, field: FieldName, validator: Arc<dyn FieldValidator>) {
        self.by_field.entry(field).or_default().push(validator);
    }

    /// Returns the validators registered for `field`.
    #[must_use]
    pub fn validators_for(&self, field: &FieldName) -> &[Arc<dyn FieldValidator>] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Runs every validator of `field` against `value`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised.
    pub fn check(&self, field: &FieldName, value: &FieldValue) -> Result<(), ValidationError> {
        self.validators_for(field).iter().try_for_each(|validator| validator.validate(value))
    }

    /// Returns `true` when no validator is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, validators) in &self.by_field {
            let names: Vec<&str> = validators.iter().map(|validator| validator.name()).collect();
            map.entry(field, &names);
        }
        map.finish()
    }
}

// ============================================================================
// SECTION: Built-in Validators
// ============================================================================

/// Accepts text of the form `NNN-NN-NNNN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsnFormatValidator;

impl FieldValidator for SsnFormatValidator {
    fn name(&self) -> &'static str {
        "ssn_format"
    }

    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let FieldValue::Text(text) = value else {
            return Err(ValidationError::new(self.name(), "expected text"));
        };
        let groups: Vec<&str> = text.split('-').collect();
        let shaped = matches!(groups.as_slice(), [area, group, serial]
            if area.len() == 3 && group.len() == 2 && serial.len() == 4);
        if shaped && groups.iter().all(|part| part.bytes().all(|b| b.is_ascii_digit())) {
            Ok(())
        } else {
            Err(ValidationError::new(self.name(), "expected NNN-NN-NNNN"))
        }
    }
}

/// Accepts `local@domain.tld` shaped addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailFormatValidator;

impl FieldValidator for EmailFormatValidator {
    fn name(&self) -> &'static str {
        "email_format"
    }

    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let FieldValue::Text(text) = value else {
            return Err(ValidationError::new(self.name(), "expected text"));
        };
        let valid = match text.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && !text.chars().any(char::is_whitespace)
                    && domain.contains('.')
                    && domain.split('.').all(|label| !label.is_empty())
            }
            None => false,
        };
        if valid {
            Ok(())
        } else {
            Err(ValidationError::new(self.name(), "expected an address like name@example.com"))
        }
    }
}

/// Accepts ten-digit phone numbers, ignoring common separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneFormatValidator;

impl PhoneFormatValidator {
    /// Separators ignored between digits.
    const SEPARATORS: [char; 5] = ['-', ' ', '(', ')', '.'];
}

impl FieldValidator for PhoneFormatValidator {
    fn name(&self) -> &'static str {
        "phone_format"
    }

    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let FieldValue::Text(text) = value else {
            return Err(ValidationError::new(self.name(), "expected text"));
        };
        let mut digits = 0usize;
        for ch in text.chars() {
            if ch.is_ascii_digit() {
                digits += 1;
            } else if !Self::SEPARATORS.contains(&ch) {
                return Err(ValidationError::new(self.name(), format!("unexpected character '{ch}'")));
            }
        }
        if digits == 10 {
            Ok(())
        } else {
            Err(ValidationError::new(self.name(), format!("expected 10 digits, found {digits}")))
        }
    }
}

/// Rejects text longer than a fixed number of characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthValidator {
    /// Maximum characters allowed.
    max_chars: usize,
}

impl MaxLengthValidator {
    /// Creates a validator allowing at most `max_chars` characters.
    #[must_use]
    pub const fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
        }
    }
}

impl FieldValidator for MaxLengthValidator {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let length = value.as_input_text().chars().count();
        if length <= self.max_chars {
            Ok(())
        } else {
            Err(ValidationError::new(
                self.name(),
                format!("{length} characters exceeds limit of {}", self.max_chars),
            ))
        }
    }
}
