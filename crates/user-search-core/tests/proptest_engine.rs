// crates/user-search-core/tests/proptest_engine.rs
// ============================================================================
// Module: Form-State Engine Property-Based Tests
// Description: Invariants over arbitrary operation sequences.
// Purpose: Check the derived state against an independent model.
// ============================================================================

//! Property-based tests for form-state invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use user_search_core::Category;
use user_search_core::FieldName;
use user_search_core::FieldValue;
use user_search_core::FormError;
use user_search_core::FormStateEngine;
use user_search_core::fields;

const FIELDS: [&str; 11] = [
    fields::SSN,
    fields::FIRST_NAME,
    fields::LAST_NAME,
    fields::ADDRESS,
    fields::AGE,
    fields::EDUCATION_LEVEL,
    fields::JOB,
    fields::FAVORITE_FOOD,
    fields::FAVORITE_JOB,
    fields::PHONE,
    fields::EMAIL,
];

#[derive(Debug, Clone)]
enum Op {
    Select(Category),
    Deselect(Category),
    Set(&'static str, String),
    Clear(&'static str),
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let field = prop::sample::select(FIELDS.to_vec());
    prop_oneof![
        category_strategy().prop_map(Op::Select),
        category_strategy().prop_map(Op::Deselect),
        (field.clone(), prop_oneof![Just(String::new()), "[a-z0-9-]{1,8}"])
            .prop_map(|(name, text)| Op::Set(name, text)),
        field.prop_map(Op::Clear),
    ]
}

fn category_fields(category: Category) -> &'static [&'static str] {
    match category {
        Category::Id => &[fields::SSN],
        Category::PersonalInfo => &[
            fields::FIRST_NAME,
            fields::LAST_NAME,
            fields::ADDRESS,
            fields::AGE,
            fields::EDUCATION_LEVEL,
        ],
        Category::GeneralInfo => &[
            fields::FIRST_NAME,
            fields::LAST_NAME,
            fields::JOB,
            fields::FAVORITE_FOOD,
            fields::FAVORITE_JOB,
        ],
        Category::ContactInfo => &[fields::PHONE, fields::EMAIL],
    }
}

fn filled(engine: &FormStateEngine, name: &str) -> bool {
    engine.field_value(&FieldName::new(name)).is_some_and(|value| !value.is_empty())
}

fn model_submit(engine: &FormStateEngine) -> bool {
    let selected = engine.selected_categories();
    !selected.is_empty()
        && selected.iter().all(|category| match category {
            Category::Id => filled(engine, fields::SSN),
            Category::PersonalInfo => [fields::FIRST_NAME, fields::LAST_NAME, fields::ADDRESS]
                .iter()
                .all(|name| filled(engine, name)),
            Category::GeneralInfo => [fields::FIRST_NAME, fields::LAST_NAME, fields::JOB]
                .iter()
                .all(|name| filled(engine, name)),
            Category::ContactInfo => filled(engine, fields::PHONE) || filled(engine, fields::EMAIL),
        })
}

fn model_visible(engine: &FormStateEngine) -> BTreeSet<&'static str> {
    engine
        .selected_categories()
        .iter()
        .flat_map(|category| category_fields(*category).iter().copied())
        .collect()
}

proptest! {
    #[test]
    fn derived_state_matches_model(ops in prop::collection::vec(op_strategy(), 0 .. 40)) {
        let mut engine = FormStateEngine::standard();
        for op in ops {
            match op {
                Op::Select(category) => {
                    let was = engine.is_selected(category);
                    let result = engine.select_category(category);
                    prop_assert_eq!(result.is_err(), was);
                }
                Op::Deselect(category) => {
                    let was = engine.is_selected(category);
                    let result = engine.deselect_category(category);
                    prop_assert_eq!(result == Err(FormError::NotSelected(category)), !was);
                }
                Op::Set(name, text) => {
                    let field = FieldName::new(name);
                    let visible = engine.is_visible(&field);
                    let result = engine.set_field_value(&field, text.as_str());
                    prop_assert_eq!(result.is_ok(), visible);
                    if visible {
                        prop_assert_eq!(engine.field_value(&field), Some(&FieldValue::from(text)));
                    }
                }
                Op::Clear(name) => {
                    let field = FieldName::new(name);
                    let visible = engine.is_visible(&field);
                    prop_assert_eq!(engine.clear_field(&field).is_ok(), visible);
                }
            }

            prop_assert_eq!(engine.is_submit_enabled(), model_submit(&engine));
            prop_assert_eq!(engine.readiness().submit_enabled, engine.is_submit_enabled());
            let visible: BTreeSet<&str> =
                engine.visible_fields().iter().map(FieldName::as_str).collect();
            prop_assert_eq!(visible.len(), engine.visible_fields().len());
            prop_assert_eq!(visible, model_visible(&engine));
            for name in FIELDS {
                let field = FieldName::new(name);
                if engine.field_value(&field).is_some() {
                    prop_assert!(engine.is_visible(&field));
                }
            }
        }
    }

    #[test]
    fn select_then_deselect_round_trips(
        base in prop::sample::subsequence(Category::ALL.to_vec(), 0 ..= 4),
        category in category_strategy(),
    ) {
        let mut engine = FormStateEngine::standard();
        for selected in &base {
            if *selected != category {
                engine.select_category(*selected).unwrap();
            }
        }
        let shares_fields = engine.selected_categories().iter().any(|other| {
            category_fields(*other).iter().any(|name| category_fields(category).contains(name))
        });
        prop_assume!(!shares_fields);

        let visible_before = engine.visible_fields().to_vec();
        let submit_before = engine.is_submit_enabled();
        engine.select_category(category).unwrap();
        engine.deselect_category(category).unwrap();
        prop_assert_eq!(engine.visible_fields(), visible_before.as_slice());
        prop_assert_eq!(engine.is_submit_enabled(), submit_before);
    }
}
