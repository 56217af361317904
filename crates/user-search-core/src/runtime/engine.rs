// crates/user-search-core/src/runtime/engine.rs
// ============================================================================
// Module: User Search Form-State Engine
// Description: Category selection, field visibility, values, and readiness.
// Purpose: Own the client-side state model behind the user search form.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`FormStateEngine`] is the single owner of form state for one session.
//! Every mutation checks its preconditions first, leaves the state untouched
//! when they fail, recomputes derived state when they hold, and reports a
//! [`FormEvent`] either way.
//!
//! Invariants:
//! - Visible fields are the union of the selected categories' fields, in
//!   catalog order, each field once.
//! - Only visible fields hold values.
//! - The Next button is enabled iff at least one category is selected and
//!   every selected category's requirement holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::core::Category;
use crate::core::EducationLevel;
use crate::core::FieldCatalog;
use crate::core::FieldName;
use crate::core::FieldValue;
use crate::core::FormAction;
use crate::core::FormError;
use crate::core::FormEvent;
use crate::core::fields;
use crate::interfaces::FormEventSink;
use crate::runtime::events::NoopEventSink;
use crate::runtime::readiness;
use crate::runtime::readiness::FieldSnapshot;
use crate::runtime::readiness::ReadinessReport;
use crate::runtime::validators::ValidatorSet;

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Form state of one user search session.
pub struct FormStateEngine {
    /// Category-to-field mapping.
    catalog: FieldCatalog,
    /// Rules deciding whether a value counts as filled in.
    validators: ValidatorSet,
    /// Event destination.
    sink: Arc<dyn FormEventSink>,
    /// Selected categories.
    selected: BTreeSet<Category>,
    /// Visible fields in catalog order.
    visible: Vec<FieldName>,
    /// Values of visible fields.
    values: BTreeMap<FieldName, FieldValue>,
    /// Cached Next button state.
    submit_enabled: bool,
}

impl FormStateEngine {
    /// Creates an empty engine without validators or event logging.
    #[must_use]
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            validators: ValidatorSet::new(),
            sink: Arc::new(NoopEventSink),
            selected: BTreeSet::new(),
            visible: Vec::new(),
            values: BTreeMap::new(),
            submit_enabled: false,
        }
    }

    /// Creates an empty engine over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(FieldCatalog::standard())
    }

    /// Replaces the validator set and re-derives readiness.
    #[must_use]
    pub fn with_validators(mut self, validators: ValidatorSet) -> Self {
        self.validators = validators;
        self.refresh_submit();
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn FormEventSink>) -> Self {
        self.sink = sink;
        self
    }

    // ------------------------------------------------------------------------
    // Category selection
    // ------------------------------------------------------------------------

    /// Selects `category`, revealing its fields.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidCategory`] when the catalog does not offer
    /// the category and [`FormError::AlreadySelected`] when it is selected.
    pub fn select_category(&mut self, category: Category) -> Result<(), FormError> {
        let result = self.apply_select(category);
        self.emit(FormAction::SelectCategory, Some(category), None, result)
    }

    /// Parses `label` and selects the category.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidCategory`] when the label does not name a
    /// category, otherwise as [`FormStateEngine::select_category`].
    pub fn select_category_label(&mut self, label: &str) -> Result<(), FormError> {
        match Category::parse(label) {
            Ok(category) => self.select_category(category),
            Err(err) => self.emit(FormAction::SelectCategory, None, None, Err(err)),
        }
    }

    /// Deselects `category`, hiding and clearing fields no other selected
    /// category owns.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidCategory`] when the catalog does not offer
    /// the category and [`FormError::NotSelected`] when it is not selected.
    pub fn deselect_category(&mut self, category: Category) -> Result<(), FormError> {
        let result = self.apply_deselect(category);
        self.emit(FormAction::DeselectCategory, Some(category), None, result)
    }

    /// Parses `label` and deselects the category.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidCategory`] when the label does not name a
    /// category, otherwise as [`FormStateEngine::deselect_category`].
    pub fn deselect_category_label(&mut self, label: &str) -> Result<(), FormError> {
        match Category::parse(label) {
            Ok(category) => self.deselect_category(category),
            Err(err) => self.emit(FormAction::DeselectCategory, None, None, Err(err)),
        }
    }

    // ------------------------------------------------------------------------
    // Field edits
    // ------------------------------------------------------------------------

    /// Stores `value` in a visible field. The value is not format-checked.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the field is not visible.
    pub fn set_field_value(
        &mut self,
        field: &FieldName,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let result = self.apply_set(field, value.into());
        self.emit(FormAction::SetFieldValue, None, Some(field.clone()), result)
    }

    /// Removes the value of a visible field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when the field is not visible.
    pub fn clear_field(&mut self, field: &FieldName) -> Result<(), FormError> {
        let result = self.ensure_visible(field).map(|()| {
            self.values.remove(field);
            self.refresh_submit();
        });
        self.emit(FormAction::ClearField, None, Some(field.clone()), result)
    }

    /// Chooses an Education Level option by label or identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidEducationLevel`] for an unknown option and
    /// [`FormError::UnknownField`] when the dropdown is not visible.
    pub fn select_education_level(&mut self, level: &str) -> Result<(), FormError> {
        let field = FieldName::new(fields::EDUCATION_LEVEL);
        let result = EducationLevel::parse(level)
            .and_then(|level| self.apply_set(&field, FieldValue::Choice(level)));
        self.emit(FormAction::SelectEducationLevel, None, Some(field), result)
    }

    /// Returns the engine to its freshly created state.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.visible.clear();
        self.values.clear();
        self.submit_enabled = false;
        self.record(FormAction::Reset, None, None, None);
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Returns the Next button state.
    #[must_use]
    pub const fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Evaluates every selected category and explains failures.
    #[must_use]
    pub fn readiness(&self) -> ReadinessReport {
        ReadinessReport::evaluate(&self.catalog, &self.selected, &self.snapshot())
    }

    /// Returns the selected categories.
    #[must_use]
    pub const fn selected_categories(&self) -> &BTreeSet<Category> {
        &self.selected
    }

    /// Returns `true` when `category` is selected.
    #[must_use]
    pub fn is_selected(&self, category: Category) -> bool {
        self.selected.contains(&category)
    }

    /// Returns the visible fields in catalog order.
    #[must_use]
    pub fn visible_fields(&self) -> &[FieldName] {
        &self.visible
    }

    /// Returns `true` when `field` is visible.
    #[must_use]
    pub fn is_visible(&self, field: &FieldName) -> bool {
        self.visible.contains(field)
    }

    /// Returns the value held by `field`.
    #[must_use]
    pub fn field_value(&self, field: &FieldName) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Returns the validator set.
    #[must_use]
    pub const fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Checks and applies a selection.
    fn apply_select(&mut self, category: Category) -> Result<(), FormError> {
        if !self.catalog.contains(category) {
            return Err(FormError::InvalidCategory(category.label().to_string()));
        }
        if !self.selected.insert(category) {
            return Err(FormError::AlreadySelected(category));
        }
        self.refresh_visibility();
        self.refresh_submit();
        Ok(())
    }

    /// Checks and applies a deselection.
    fn apply_deselect(&mut self, category: Category) -> Result<(), FormError> {
        if !self.catalog.contains(category) {
            return Err(FormError::InvalidCategory(category.label().to_string()));
        }
        if !self.selected.remove(&category) {
            return Err(FormError::NotSelected(category));
        }
        self.refresh_visibility();
        let visible = &self.visible;
        self.values.retain(|field, _| visible.contains(field));
        self.refresh_submit();
        Ok(())
    }

    /// Checks visibility and stores a value.
    fn apply_set(&mut self, field: &FieldName, value: FieldValue) -> Result<(), FormError> {
        self.ensure_visible(field)?;
        self.values.insert(field.clone(), value);
        self.refresh_submit();
        Ok(())
    }

    /// Fails unless `field` is visible.
    fn ensure_visible(&self, field: &FieldName) -> Result<(), FormError> {
        if self.is_visible(field) {
            Ok(())
        } else {
            Err(FormError::UnknownField(field.clone()))
        }
    }

    /// Rebuilds the visible field list from the selection.
    fn refresh_visibility(&mut self) {
        let mut visible: Vec<FieldName> = Vec::new();
        for spec in self.catalog.categories() {
            if !self.selected.contains(&spec.category) {
                continue;
            }
            for field in &spec.fields {
                if !visible.contains(&field.name) {
                    visible.push(field.name.clone());
                }
            }
        }
        self.visible = visible;
    }

    /// Recomputes the cached Next button state.
    fn refresh_submit(&mut self) {
        self.submit_enabled =
            readiness::submit_enabled(&self.catalog, &self.selected, &self.snapshot());
    }

    /// Builds the requirement reader over current values.
    fn snapshot(&self) -> FieldSnapshot<'_> {
        FieldSnapshot::new(&self.values, &self.validators)
    }

    /// Records the outcome of an operation and hands it back.
    fn emit(
        &self,
        action: FormAction,
        category: Option<Category>,
        field: Option<FieldName>,
        result: Result<(), FormError>,
    ) -> Result<(), FormError> {
        self.record(action, category, field, result.as_ref().err());
        result
    }

    /// Sends one event describing the current state to the sink.
    fn record(
        &self,
        action: FormAction,
        category: Option<Category>,
        field: Option<FieldName>,
        error: Option<&FormError>,
    ) {
        let event = FormEvent::new(action, category, field, error, self.submit_enabled);
        self.sink.record(&event);
    }
}

impl Default for FormStateEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FormStateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStateEngine")
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .field("values", &self.values)
            .field("validators", &self.validators)
            .field("submit_enabled", &self.submit_enabled)
            .finish_non_exhaustive()
    }
}
