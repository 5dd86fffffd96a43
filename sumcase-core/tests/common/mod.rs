// Test utilities and generators for sumcase property-based testing

#![allow(dead_code)]

use proptest::prelude::*;
use std::collections::BTreeSet;
use sumcase_core::data::Value;
use sumcase_core::definition::VariantDefinition;

/// Install a test-writer subscriber so `RUST_LOG=sumcase_core=trace` shows
/// dispatch events. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Generate identifier-like names
pub fn arb_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9_]{0,8}"
}

/// Generate field names
pub fn arb_field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Generate a list of distinct field names
pub fn arb_field_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(arb_field_name(), 0..6).prop_map(|s| s.into_iter().collect())
}

/// Generate primitive host values
pub fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Double),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

/// Generate host values with limited nesting
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_primitive().prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::array)
    })
}

/// Generate a definition of field-list variants with distinct names, along
/// with the names and field lists in definition order.
pub fn arb_definition() -> impl Strategy<Value = (VariantDefinition, Vec<(String, Vec<String>)>)>
{
    prop::collection::btree_set(arb_name(), 1..6)
        .prop_flat_map(|names: BTreeSet<String>| {
            let names: Vec<String> = names.into_iter().collect();
            let n = names.len();
            (Just(names), prop::collection::vec(arb_field_list(), n))
        })
        .prop_map(|(names, field_lists)| {
            let variants: Vec<(String, Vec<String>)> = names.into_iter().zip(field_lists).collect();
            let definition = variants
                .iter()
                .fold(VariantDefinition::new(), |def, (name, fields)| {
                    def.fields(name.clone(), fields.clone())
                });
            (definition, variants)
        })
}

/// Definition of family `T` with three fieldless variants A, B and C
pub fn abc_definition() -> VariantDefinition {
    VariantDefinition::new()
        .named("T")
        .fields("A", Vec::<String>::new())
        .fields("B", Vec::<String>::new())
        .fields("C", Vec::<String>::new())
}
