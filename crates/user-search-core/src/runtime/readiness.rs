// crates/user-search-core/src/runtime/readiness.rs
// ============================================================================
// Module: User Search Readiness
// Description: Evaluation of category requirements against field values.
// Purpose: Derive the Next button state and explain why it is disabled.
// Dependencies: form-logic, serde, crate::{core, runtime::validators}
// ============================================================================

//! ## Overview
//! Readiness bridges the requirement algebra with the current field values.
//! A field leaf holds when the field has a non-empty value that passes every
//! validator registered for it. The Next button is enabled only when at least
//! one category is selected and every selected category's requirement holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use form_logic::PredicateEval;
use form_logic::RequirementError;
use serde::Serialize;

use crate::core::Category;
use crate::core::CategorySpec;
use crate::core::FieldCatalog;
use crate::core::FieldName;
use crate::core::FieldValue;
use crate::runtime::validators::ValidatorSet;

// ============================================================================
// SECTION: Field Snapshot
// ============================================================================

/// Read-only view of field values used as the requirement reader.
#[derive(Debug, Clone, Copy)]
pub struct FieldSnapshot<'a> {
    /// Current values by field.
    values: &'a BTreeMap<FieldName, FieldValue>,
    /// Validators deciding whether a value counts.
    validators: &'a ValidatorSet,
}

impl<'a> FieldSnapshot<'a> {
    /// Creates a snapshot over borrowed state.
    #[must_use]
    pub const fn new(
        values: &'a BTreeMap<FieldName, FieldValue>,
        validators: &'a ValidatorSet,
    ) -> Self {
        Self {
            values,
            validators,
        }
    }

    /// Returns `true` when `field` holds an acceptable non-empty value.
    #[must_use]
    pub fn is_filled(&self, field: &FieldName) -> bool {
        self.values
            .get(field)
            .is_some_and(|value| !value.is_empty() && self.validators.check(field, value).is_ok())
    }

    /// Returns `true` when `field` holds a non-empty value a validator rejects.
    #[must_use]
    pub fn is_invalid(&self, field: &FieldName) -> bool {
        self.values
            .get(field)
            .is_some_and(|value| !value.is_empty() && self.validators.check(field, value).is_err())
    }
}

impl PredicateEval for FieldName {
    type Reader<'a> = FieldSnapshot<'a>;

    fn eval(&self, reader: &FieldSnapshot<'_>) -> bool {
        reader.is_filled(self)
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Requirement status of one selected category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReadiness {
    /// Category evaluated.
    pub category: Category,
    /// Whether the requirement holds.
    pub satisfied: bool,
    /// Fields that must be filled for the requirement to hold, in requirement
    /// order. Empty when satisfied, or when only a negated branch fails.
    pub missing: Vec<FieldName>,
    /// Fields holding a value that a validator rejected.
    pub invalid: Vec<FieldName>,
    /// First failing branch of the requirement.
    pub reason: Option<RequirementError>,
}

impl CategoryReadiness {
    /// Evaluates `spec` against `snapshot`.
    #[must_use]
    pub fn evaluate(spec: &CategorySpec, snapshot: &FieldSnapshot<'_>) -> Self {
        let satisfied = spec.requirement.eval(snapshot);
        let invalid = spec
            .fields
            .iter()
            .filter(|field| snapshot.is_invalid(&field.name))
            .map(|field| field.name.clone())
            .collect();
        if satisfied {
            return Self {
                category: spec.category,
                satisfied,
                missing: Vec::new(),
                invalid,
                reason: None,
            };
        }
        Self {
            category: spec.category,
            satisfied,
            missing: spec.requirement.unmet_predicates(snapshot).into_iter().cloned().collect(),
            invalid,
            reason: spec.requirement.check(snapshot).err(),
        }
    }
}

/// Readiness of the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    /// Next button state.
    pub submit_enabled: bool,
    /// Per-category status in catalog order.
    pub categories: Vec<CategoryReadiness>,
}

impl ReadinessReport {
    /// Evaluates every selected category.
    #[must_use]
    pub fn evaluate(
        catalog: &FieldCatalog,
        selected: &BTreeSet<Category>,
        snapshot: &FieldSnapshot<'_>,
    ) -> Self {
        let categories: Vec<CategoryReadiness> = catalog
            .categories()
            .iter()
            .filter(|spec| selected.contains(&spec.category))
            .map(|spec| CategoryReadiness::evaluate(spec, snapshot))
            .collect();
        let submit_enabled =
            !categories.is_empty() && categories.iter().all(|status| status.satisfied);
        Self {
            submit_enabled,
            categories,
        }
    }

    /// Returns the status of `category` when it is selected.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryReadiness> {
        self.categories.iter().find(|status| status.category == category)
    }
}

/// Computes only the Next button state, short-circuiting on the first miss.
#[must_use]
pub fn submit_enabled(
    catalog: &FieldCatalog,
    selected: &BTreeSet<Category>,
    snapshot: &FieldSnapshot<'_>,
) -> bool {
    !selected.is_empty()
        && selected.iter().all(|category| {
            catalog.category(*category).is_some_and(|spec| spec.requirement.eval(snapshot))
        })
}
