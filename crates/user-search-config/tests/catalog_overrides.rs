// crates/user-search-config/tests/catalog_overrides.rs
// =============================================================================
// Module: Catalog Override Tests
// Description: Requirement overrides and configured validators.
// Purpose: Ensure overrides change readiness and bad overrides fail closed.
// =============================================================================

//! Catalog override and validator assembly tests for user-search-config.

use user_search_config::CatalogOverride;
use user_search_config::ConfigError;
use user_search_config::UserSearchConfig;
use user_search_core::Category;
use user_search_core::FieldName;
use user_search_core::fields;

type TestResult = Result<(), String>;

fn with_override(category: &str, requirement: &str) -> UserSearchConfig {
    UserSearchConfig {
        catalog: vec![CatalogOverride {
            category: category.to_string(),
            requirement: requirement.to_string(),
        }],
        ..UserSearchConfig::default()
    }
}

fn expect_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(ConfigError::Invalid(message)) if message.contains(needle) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn override_requires_both_contact_methods() -> TestResult {
    let config = with_override("contact_info", "phone && email");
    config.validate().map_err(|err| err.to_string())?;
    let mut engine = config.build_engine().map_err(|err| err.to_string())?;
    engine.select_category(Category::ContactInfo).map_err(|err| err.to_string())?;
    engine
        .set_field_value(&FieldName::new(fields::PHONE), "555-555-5555")
        .map_err(|err| err.to_string())?;
    if engine.is_submit_enabled() {
        return Err("phone alone should no longer be enough".to_string());
    }
    engine
        .set_field_value(&FieldName::new(fields::EMAIL), "test@example.com")
        .map_err(|err| err.to_string())?;
    if !engine.is_submit_enabled() {
        return Err("both contact methods should satisfy".to_string());
    }
    Ok(())
}

#[test]
fn override_accepts_display_label() -> TestResult {
    let config = with_override("Personal Info", "at_least(2, first_name, last_name, address)");
    let catalog = config.build_catalog().map_err(|err| err.to_string())?;
    let spec = catalog.category(Category::PersonalInfo).ok_or("personal info missing")?;
    if spec.requirement.predicates().len() != 3 {
        return Err("override should list three fields".to_string());
    }
    Ok(())
}

#[test]
fn override_cannot_reference_other_category_fields() -> TestResult {
    expect_invalid(with_override("contact_info", "phone || ssn").validate(), "unknown name `ssn`")
}

#[test]
fn override_rejects_unknown_category() -> TestResult {
    expect_invalid(with_override("hobbies", "phone").validate(), "catalog.category")
}

#[test]
fn override_rejects_syntax_errors() -> TestResult {
    expect_invalid(with_override("id", "ssn &&").validate(), "catalog.requirement for id")
}

#[test]
fn override_rejects_long_negation_chains() -> TestResult {
    let requirement = format!("{}ssn", "!".repeat(16_000));
    expect_invalid(with_override("id", &requirement).validate(), "catalog.requirement for id")
}

#[test]
fn duplicate_overrides_are_rejected() -> TestResult {
    let mut config = with_override("id", "ssn");
    config.catalog.push(CatalogOverride {
        category: "ID".to_string(),
        requirement: "ssn".to_string(),
    });
    expect_invalid(config.validate(), "declared twice")
}

#[test]
fn default_validators_enforce_ssn_shape() -> TestResult {
    let mut engine = UserSearchConfig::default().build_engine().map_err(|err| err.to_string())?;
    engine.select_category(Category::Id).map_err(|err| err.to_string())?;
    engine.set_field_value(&FieldName::new(fields::SSN), "123-45").map_err(|err| err.to_string())?;
    if engine.is_submit_enabled() {
        return Err("partial SSN should not count".to_string());
    }
    engine
        .set_field_value(&FieldName::new(fields::SSN), "123-45-6789")
        .map_err(|err| err.to_string())?;
    if !engine.is_submit_enabled() {
        return Err("well-formed SSN should count".to_string());
    }
    Ok(())
}

#[test]
fn max_value_length_applies_to_text_fields() -> TestResult {
    let mut config = UserSearchConfig::default();
    config.validation.max_value_length = 4;
    let mut engine = config.build_engine().map_err(|err| err.to_string())?;
    engine.select_category(Category::ContactInfo).map_err(|err| err.to_string())?;
    engine.set_field_value(&FieldName::new(fields::EMAIL), "a@b.co").map_err(|err| err.to_string())?;
    if engine.is_submit_enabled() {
        return Err("value over the limit should not count".to_string());
    }
    engine.set_field_value(&FieldName::new(fields::PHONE), "5555").map_err(|err| err.to_string())?;
    if !engine.is_submit_enabled() {
        return Err("value within the limit should count".to_string());
    }
    Ok(())
}
