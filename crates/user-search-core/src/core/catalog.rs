// crates/user-search-core/src/core/catalog.rs
// ============================================================================
// Module: User Search Field Catalog
// Description: Static mapping from categories to fields and requirements.
// Purpose: Define which fields each category reveals and which must be filled.
// Dependencies: form-logic, serde, thiserror, crate::core::*
// ============================================================================

//! ## Overview
//! A [`FieldCatalog`] lists, per category, its ordered fields and a
//! requirement tree over those fields. Fields may be shared between
//! categories (First Name and Last Name appear in both Personal Info and
//! General Info); a shared field must be declared identically everywhere it
//! appears.
//!
//! The default requirement of a category is "every `Required` field, plus any
//! one `Alternative` field". Catalogs can replace it, for example from
//! configuration, as long as the new tree only names the category's own
//! fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use form_logic::Requirement;
use form_logic::StructureValidator;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::category::Category;
use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Standard Field Names
// ============================================================================

/// Identifiers of the fields in the standard catalog.
pub mod fields {
    /// Social Security Number.
    pub const SSN: &str = "ssn";
    /// First Name.
    pub const FIRST_NAME: &str = "first_name";
    /// Last Name.
    pub const LAST_NAME: &str = "last_name";
    /// Street address.
    pub const ADDRESS: &str = "address";
    /// Age.
    pub const AGE: &str = "age";
    /// Education Level dropdown.
    pub const EDUCATION_LEVEL: &str = "education_level";
    /// Job.
    pub const JOB: &str = "job";
    /// Favorite Food.
    pub const FAVORITE_FOOD: &str = "favorite_food";
    /// Favorite Job.
    pub const FAVORITE_JOB: &str = "favorite_job";
    /// Phone number.
    pub const PHONE: &str = "phone";
    /// Email address.
    pub const EMAIL: &str = "email";
}

// ============================================================================
// SECTION: Field Specs
// ============================================================================

/// Input control behind a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Text input.
    Text,
    /// Numeric input.
    Number,
    /// Education Level dropdown.
    Choice,
}

/// How a field contributes to its category's default requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Must be filled.
    Required,
    /// Never needed.
    Optional,
    /// One of the category's alternatives must be filled.
    Alternative,
}

/// Declaration of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier.
    pub name: FieldName,
    /// Label shown next to the input.
    pub label: String,
    /// Input control.
    pub kind: FieldKind,
    /// Default requirement role.
    pub role: FieldRole,
}

impl FieldSpec {
    /// Creates a field declaration.
    #[must_use]
    pub fn new(name: &str, label: &str, kind: FieldKind, role: FieldRole) -> Self {
        Self {
            name: FieldName::new(name),
            label: label.to_string(),
            kind,
            role,
        }
    }

    /// Returns `true` when the declarations agree apart from role.
    fn same_control(&self, other: &Self) -> bool {
        self.label == other.label && self.kind == other.kind
    }
}

// ============================================================================
// SECTION: Category Specs
// ============================================================================

/// Fields and requirement of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category described.
    pub category: Category,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
    /// Requirement that must hold for the category to be satisfied.
    pub requirement: Requirement<FieldName>,
}

impl CategorySpec {
    /// Creates a category whose requirement is derived from field roles.
    #[must_use]
    pub fn new(category: Category, fields: Vec<FieldSpec>) -> Self {
        let requirement = default_requirement(&fields);
        Self {
            category,
            fields,
            requirement,
        }
    }

    /// Returns the field declaration named `name`.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| &field.name == name)
    }

    /// Returns `true` when the category declares `name`.
    #[must_use]
    pub fn owns(&self, name: &FieldName) -> bool {
        self.field(name).is_some()
    }
}

/// Builds `all(required..., any(alternatives...))`, collapsing single members.
fn default_requirement(fields: &[FieldSpec]) -> Requirement<FieldName> {
    let leaves = |role: FieldRole| -> Vec<Requirement<FieldName>> {
        fields
            .iter()
            .filter(|field| field.role == role)
            .map(|field| Requirement::predicate(field.name.clone()))
            .collect()
    };
    let mut parts = leaves(FieldRole::Required);
    let mut alternatives = leaves(FieldRole::Alternative);
    match alternatives.len() {
        0 => {}
        1 => parts.append(&mut alternatives),
        _ => parts.push(Requirement::or(alternatives)),
    }
    if parts.len() == 1
        && let Some(only) = parts.pop()
    {
        return only;
    }
    Requirement::and(parts)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Rejected catalog definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The same category is declared twice.
    #[error("category declared twice: {0}")]
    DuplicateCategory(Category),
    /// A category declares the same field twice.
    #[error("field {field} declared twice in {category}")]
    DuplicateField {
        /// Category containing the duplicate.
        category: Category,
        /// Duplicated field.
        field: FieldName,
    },
    /// A shared field has a different label or kind in two categories.
    #[error("field {0} is declared inconsistently across categories")]
    InconsistentField(FieldName),
    /// A requirement names a field the category does not declare.
    #[error("requirement of {category} references undeclared field {field}")]
    ForeignField {
        /// Category whose requirement is invalid.
        category: Category,
        /// Undeclared field.
        field: FieldName,
    },
    /// A requirement tree is structurally invalid.
    #[error("requirement of {category} is invalid: {reason}")]
    InvalidRequirement {
        /// Category whose requirement is invalid.
        category: Category,
        /// Structural problem.
        reason: String,
    },
    /// The catalog does not offer the category.
    #[error("category not in catalog: {0}")]
    MissingCategory(Category),
}

/// Validated category-to-field mapping.
///
/// # Invariants
/// - Categories are unique and kept in [`Category`] order.
/// - Shared fields have identical label and kind everywhere.
/// - Every requirement only references its own category's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCatalog {
    /// Category specs in [`Category`] order.
    categories: Vec<CategorySpec>,
}

impl FieldCatalog {
    /// Validates and builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the definition breaks an invariant.
    pub fn new(mut categories: Vec<CategorySpec>) -> Result<Self, CatalogError> {
        categories.sort_by_key(|spec| spec.category);
        let mut shared: BTreeMap<&FieldName, &FieldSpec> = BTreeMap::new();
        for (index, spec) in categories.iter().enumerate() {
            if index > 0 && categories[index - 1].category == spec.category {
                return Err(CatalogError::DuplicateCategory(spec.category));
            }
            for (position, field) in spec.fields.iter().enumerate() {
                if spec.fields[.. position].iter().any(|earlier| earlier.name == field.name) {
                    return Err(CatalogError::DuplicateField {
                        category: spec.category,
                        field: field.name.clone(),
                    });
                }
                match shared.get(&field.name) {
                    Some(existing) if !existing.same_control(field) => {
                        return Err(CatalogError::InconsistentField(field.name.clone()));
                    }
                    Some(_) => {}
                    None => {
                        shared.insert(&field.name, field);
                    }
                }
            }
            check_requirement(spec)?;
        }
        Ok(Self {
            categories,
        })
    }

    /// Returns the catalog used by the user search page.
    #[must_use]
    pub fn standard() -> Self {
        use FieldKind::Choice;
        use FieldKind::Number;
        use FieldKind::Text;
        use FieldRole::Alternative;
        use FieldRole::Optional;
        use FieldRole::Required;

        let first_name = FieldSpec::new(fields::FIRST_NAME, "First Name", Text, Required);
        let last_name = FieldSpec::new(fields::LAST_NAME, "Last Name", Text, Required);
        Self {
            categories: vec![
                CategorySpec::new(Category::Id, vec![FieldSpec::new(
                    fields::SSN,
                    "SSN",
                    Text,
                    Required,
                )]),
                CategorySpec::new(Category::PersonalInfo, vec![
                    first_name.clone(),
                    last_name.clone(),
                    FieldSpec::new(fields::ADDRESS, "Address", Text, Required),
                    FieldSpec::new(fields::AGE, "Age", Number, Optional),
                    FieldSpec::new(fields::EDUCATION_LEVEL, "Education Level", Choice, Optional),
                ]),
                CategorySpec::new(Category::GeneralInfo, vec![
                    first_name,
                    last_name,
                    FieldSpec::new(fields::JOB, "Job", Text, Required),
                    FieldSpec::new(fields::FAVORITE_FOOD, "Favorite Food", Text, Optional),
                    FieldSpec::new(fields::FAVORITE_JOB, "Favorite Job", Text, Optional),
                ]),
                CategorySpec::new(Category::ContactInfo, vec![
                    FieldSpec::new(fields::PHONE, "Phone", Text, Alternative),
                    FieldSpec::new(fields::EMAIL, "Email", Text, Alternative),
                ]),
            ],
        }
    }

    /// Returns a copy with `category`'s requirement replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCategory`] when the category is not in
    /// the catalog, or a validation error for the new requirement.
    pub fn with_requirement(
        mut self,
        category: Category,
        requirement: Requirement<FieldName>,
    ) -> Result<Self, CatalogError> {
        let spec = self
            .categories
            .iter_mut()
            .find(|spec| spec.category == category)
            .ok_or(CatalogError::MissingCategory(category))?;
        spec.requirement = requirement;
        check_requirement(spec)?;
        Ok(self)
    }

    /// Returns the spec of `category`.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategorySpec> {
        self.categories.iter().find(|spec| spec.category == category)
    }

    /// Returns `true` when the catalog offers `category`.
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.category(category).is_some()
    }

    /// Returns every category spec in order.
    #[must_use]
    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    /// Returns the first declaration of `name` in any category.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&FieldSpec> {
        self.categories.iter().find_map(|spec| spec.field(name))
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Checks a category requirement for structure and foreign fields.
fn check_requirement(spec: &CategorySpec) -> Result<(), CatalogError> {
    StructureValidator::default().validate(&spec.requirement).map_err(|err| {
        CatalogError::InvalidRequirement {
            category: spec.category,
            reason: err.to_string(),
        }
    })?;
    if let Some(field) = spec.requirement.predicates().into_iter().find(|field| !spec.owns(field)) {
        return Err(CatalogError::ForeignField {
            category: spec.category,
            field: field.clone(),
        });
    }
    Ok(())
}
