// crates/user-search-core/src/runtime/page.rs
// ============================================================================
// Module: User Search Page Object
// Description: User-level actions over an explicitly passed engine.
// Purpose: Let scenarios read like the steps a person takes on the page.
// Dependencies: thiserror, crate::{core, runtime::engine}
// ============================================================================

//! ## Overview
//! [`UserSearchPage`] borrows a [`FormStateEngine`] and exposes the actions a
//! person performs on the user search page: picking categories from the
//! dropdown, typing into inputs, and looking at the Next button.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::Category;
use crate::core::FieldName;
use crate::core::FormError;
use crate::core::fields;
use crate::runtime::engine::FormStateEngine;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Page action failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A multi-category action was given no categories.
    #[error("category selection expects at least one category label")]
    EmptySelection,
    /// The engine rejected the action.
    #[error(transparent)]
    Form(#[from] FormError),
}

impl PageError {
    /// Returns a stable label for logs and scripts.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptySelection => "empty_selection",
            Self::Form(err) => err.kind(),
        }
    }
}

/// Next button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// Clickable.
    Enabled,
    /// Greyed out.
    Disabled,
}

/// Presence of a field on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Rendered.
    Visible,
    /// Not rendered.
    Absent,
}

// ============================================================================
// SECTION: Page Object
// ============================================================================

/// User search page driven through a borrowed engine.
#[derive(Debug)]
pub struct UserSearchPage<'a> {
    /// Engine holding the page state.
    engine: &'a mut FormStateEngine,
}

impl<'a> UserSearchPage<'a> {
    /// Wraps `engine`.
    pub const fn new(engine: &'a mut FormStateEngine) -> Self {
        Self {
            engine,
        }
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &FormStateEngine {
        self.engine
    }

    /// Picks each category from the dropdown, in order.
    ///
    /// Every label is parsed before anything is selected, so an unknown
    /// label leaves the page untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::EmptySelection`] for an empty list, or the first
    /// engine error.
    pub fn select_categories(&mut self, labels: &[&str]) -> Result<(), PageError> {
        for category in self.parse_labels(labels, FormStateEngine::select_category_label)? {
            self.engine.select_category(category)?;
        }
        Ok(())
    }

    /// Unpicks each category from the dropdown, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::EmptySelection`] for an empty list, or the first
    /// engine error.
    pub fn deselect_categories(&mut self, labels: &[&str]) -> Result<(), PageError> {
        for category in self.parse_labels(labels, FormStateEngine::deselect_category_label)? {
            self.engine.deselect_category(category)?;
        }
        Ok(())
    }

    /// Types into the SSN input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_ssn(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::SSN, value)
    }

    /// Types into the First Name input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_first_name(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::FIRST_NAME, value)
    }

    /// Types into the Last Name input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_last_name(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::LAST_NAME, value)
    }

    /// Types into the Address input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_address(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::ADDRESS, value)
    }

    /// Types a number into the Age input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_age(&mut self, age: u32) -> Result<(), FormError> {
        self.engine.set_field_value(&FieldName::new(fields::AGE), age)
    }

    /// Picks an Education Level option.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidEducationLevel`] for an unknown option or
    /// [`FormError::UnknownField`] when the dropdown is not shown.
    pub fn select_education_level(&mut self, level: &str) -> Result<(), FormError> {
        self.engine.select_education_level(level)
    }

    /// Types into the Job input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_job(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::JOB, value)
    }

    /// Types into the Favorite Food input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_favorite_food(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::FAVORITE_FOOD, value)
    }

    /// Types into the Favorite Job input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_favorite_job(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::FAVORITE_JOB, value)
    }

    /// Types into the Phone input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_phone(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::PHONE, value)
    }

    /// Types into the Email input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the input is not shown.
    pub fn fill_email(&mut self, value: &str) -> Result<(), FormError> {
        self.fill(fields::EMAIL, value)
    }

    /// Returns the Next button state.
    #[must_use]
    pub fn next_button(&self) -> ButtonState {
        if self.engine.is_submit_enabled() {
            ButtonState::Enabled
        } else {
            ButtonState::Disabled
        }
    }

    /// Returns whether the input for `name` is shown.
    #[must_use]
    pub fn field(&self, name: &str) -> Visibility {
        if self.engine.is_visible(&FieldName::new(name)) {
            Visibility::Visible
        } else {
            Visibility::Absent
        }
    }

    /// Types text into a field.
    fn fill(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.engine.set_field_value(&FieldName::new(name), value)
    }

    /// Parses a non-empty list of category labels.
    ///
    /// The first unknown label is handed to `reject`, the engine's label
    /// path, so the rejection is recorded like any other engine call.
    fn parse_labels(
        &mut self,
        labels: &[&str],
        reject: fn(&mut FormStateEngine, &str) -> Result<(), FormError>,
    ) -> Result<Vec<Category>, PageError> {
        if labels.is_empty() {
            return Err(PageError::EmptySelection);
        }
        let mut categories = Vec::with_capacity(labels.len());
        for label in labels {
            match Category::parse(label) {
                Ok(category) => categories.push(category),
                Err(_) => reject(self.engine, label)?,
            }
        }
        Ok(categories)
    }
}
