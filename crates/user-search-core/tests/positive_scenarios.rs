// crates/user-search-core/tests/positive_scenarios.rs
// ============================================================================
// Module: Positive User Search Scenarios
// Description: Next button enablement for each category, step by step.
// ============================================================================

//! Positive scenarios driven through the page object.

#[allow(dead_code, reason = "Shared helpers are not used by every test binary.")]
mod support;

use support::TestResult;
use support::engine;
use support::ensure;
use support::validated_engine;
use user_search_core::ButtonState;
use user_search_core::UserSearchPage;
use user_search_core::Visibility;
use user_search_core::fields;

#[test]
fn id_category_enables_next_once_ssn_is_filled() -> TestResult {
    let mut engine = validated_engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["ID"])?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled before SSN")?;
    page.fill_ssn("000-00-0000")?;
    ensure(page.next_button() == ButtonState::Enabled, "enabled after SSN")?;
    Ok(())
}

#[test]
fn personal_info_enables_next_after_last_required_field() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["Personal Info"])?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled on selection")?;
    page.fill_first_name("John")?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled after first name")?;
    page.fill_last_name("Doe")?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled after last name")?;
    page.fill_address("123 Main St")?;
    ensure(page.next_button() == ButtonState::Enabled, "enabled after address")?;
    Ok(())
}

#[test]
fn general_info_enables_next_after_last_required_field() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["General Info"])?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled on selection")?;
    page.fill_first_name("Jane")?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled after first name")?;
    page.fill_last_name("Smith")?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled after last name")?;
    page.fill_job("Engineer")?;
    ensure(page.next_button() == ButtonState::Enabled, "enabled after job")?;
    Ok(())
}

#[test]
fn contact_info_is_satisfied_by_phone_alone() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["Contact Info"])?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled on selection")?;
    page.fill_phone("555-555-5555")?;
    ensure(page.next_button() == ButtonState::Enabled, "phone satisfies contact info")?;
    Ok(())
}

#[test]
fn contact_info_is_satisfied_by_email_alone() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["Contact Info"])?;
    ensure(page.next_button() == ButtonState::Disabled, "disabled on selection")?;
    page.fill_email("test@example.com")?;
    ensure(page.next_button() == ButtonState::Enabled, "email satisfies contact info")?;
    Ok(())
}

#[test]
fn deselecting_overlapping_category_keeps_shared_fields() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["Personal Info", "General Info"])?;
    for name in [
        fields::FIRST_NAME,
        fields::LAST_NAME,
        fields::ADDRESS,
        fields::EDUCATION_LEVEL,
        fields::AGE,
        fields::JOB,
        fields::FAVORITE_FOOD,
        fields::FAVORITE_JOB,
    ] {
        ensure(page.field(name) == Visibility::Visible, format!("{name} visible with both"))?;
    }

    page.deselect_categories(&["General Info"])?;
    for name in
        [fields::FIRST_NAME, fields::LAST_NAME, fields::ADDRESS, fields::EDUCATION_LEVEL, fields::AGE]
    {
        ensure(page.field(name) == Visibility::Visible, format!("{name} kept"))?;
    }
    for name in [fields::JOB, fields::FAVORITE_FOOD, fields::FAVORITE_JOB] {
        ensure(page.field(name) == Visibility::Absent, format!("{name} hidden"))?;
    }
    Ok(())
}

#[test]
fn job_stops_counting_once_general_info_is_deselected() -> TestResult {
    let mut engine = engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["Personal Info", "General Info"])?;
    page.fill_first_name("John")?;
    page.fill_last_name("Doe")?;
    page.fill_address("123 Main St")?;
    ensure(page.next_button() == ButtonState::Disabled, "job still required")?;
    page.deselect_categories(&["General Info"])?;
    ensure(page.next_button() == ButtonState::Enabled, "personal info alone is complete")?;
    Ok(())
}

#[test]
fn every_category_together_needs_every_requirement() -> TestResult {
    let mut engine = validated_engine();
    let mut page = UserSearchPage::new(&mut engine);
    page.select_categories(&["ID", "Personal Info", "General Info", "Contact Info"])?;
    page.fill_ssn("123-45-6789")?;
    page.fill_first_name("Ada")?;
    page.fill_last_name("Lovelace")?;
    page.fill_address("12 St James's Square")?;
    page.fill_job("Analyst")?;
    ensure(page.next_button() == ButtonState::Disabled, "contact info outstanding")?;
    page.fill_email("ada@example.org")?;
    ensure(page.next_button() == ButtonState::Enabled, "all categories satisfied")?;
    Ok(())
}
