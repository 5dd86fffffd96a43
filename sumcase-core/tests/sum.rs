// Variant family construction tests for sumcase

mod common;

use common::*;
use proptest::prelude::*;
use std::fmt;
use sumcase_core::data::{Record, Value};
use sumcase_core::definition::VariantDefinition;
use sumcase_core::error::{BuilderError, SumError};
use sumcase_core::sum::make_sum;
use sumcase_core::{InstanceOf, TypeRef};

#[derive(Debug)]
struct NegativeRadius(i64);

impl fmt::Display for NegativeRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "negative radius {}", self.0)
    }
}

impl std::error::Error for NegativeRadius {}

#[test]
fn test_fieldless_variant_is_instance_of_variant_and_family() {
    init_tracing();
    let t = make_sum(VariantDefinition::new().fields("A", Vec::<String>::new()));
    let a = t["A"].call(&[]).unwrap();

    assert!(a.is_instance_of(&t["A"]));
    assert!(a.is_instance_of(&t));
    assert!(a.is_instance_of(&TypeRef::from(&t)));
}

#[test]
fn test_positional_fields() {
    let t = make_sum(VariantDefinition::new().fields("A", ["x", "y", "z"]));
    let a = t["A"]
        .call(&[Value::from("X"), Value::from("Y"), Value::from("Z")])
        .unwrap();

    let expected: Record = [("x", "X"), ("y", "Y"), ("z", "Z")].into_iter().collect();
    assert_eq!(a.as_instance().unwrap().fields(), &expected);
    assert_eq!(a.to_string(), "A { x: X, y: Y, z: Z }");
}

#[test]
fn test_builder_fields() {
    let t = make_sum(VariantDefinition::new().builder("Sum", |args: &[Value]| {
        let total: i64 = args
            .iter()
            .map(|a| match a {
                Value::Int(i) => *i,
                _ => 0,
            })
            .sum();
        Ok(Record::new().with("total", total).with("count", args.len() as i64))
    }));

    let s = t["Sum"]
        .call(&[Value::Int(1), Value::Int(2), Value::Int(3)])
        .unwrap();
    assert_eq!(s.field("total"), Some(&Value::Int(6)));
    assert_eq!(s.field("count"), Some(&Value::Int(3)));
    assert_eq!(t["Sum"].arity(), None);
    assert!(s.is_instance_of(&t["Sum"]));
}

#[test]
fn test_builder_errors_come_back_unchanged() {
    let shapes = make_sum(VariantDefinition::new().named("Shape").builder(
        "Circle",
        |args: &[Value]| match args.first() {
            Some(Value::Int(r)) if *r < 0 => Err(Box::new(NegativeRadius(*r)) as BuilderError),
            Some(r) => Ok(Record::new().with("r", r.clone())),
            None => Ok(Record::new()),
        },
    ));

    let err = shapes["Circle"].call(&[Value::Int(-2)]).unwrap_err();
    let original = err.downcast_ref::<NegativeRadius>().unwrap();
    assert_eq!(original.0, -2);

    let wrapped = SumError::from(err);
    assert!(!wrapped.is_type_error());
    assert_eq!(wrapped.to_string(), "negative radius -2");
}

#[test]
fn test_calling_the_base_fails() {
    let t = make_sum(abc_definition());
    let err = SumError::from(t.call(&[]).unwrap_err());
    assert!(err.is_type_error());
    assert_eq!(err.to_string(), "TypeError: Cannot call base constructor");
}

#[test]
fn test_construct_by_name() {
    let definition =
        VariantDefinition::from_json_str(r#"{"Leaf": [], "Node": ["left", "right"]}"#).unwrap();
    let t = make_sum(definition);
    let leaf = t.construct("Leaf", &[]).unwrap().unwrap();
    let node = t
        .construct("Node", &[leaf.clone(), leaf.clone()])
        .unwrap()
        .unwrap();

    assert!(t.construct("Missing", &[]).is_none());
    assert_eq!(t.names().collect::<Vec<_>>(), vec!["Leaf", "Node"]);
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        serde_json::json!({"tag": "Node", "left": {"tag": "Leaf"}, "right": {"tag": "Leaf"}})
    );
}

#[test]
fn test_families_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<sumcase_core::VariantFamily>();
    assert_send_sync::<Value>();

    let t = make_sum(abc_definition());
    let handle = std::thread::spawn(move || t["B"].call(&[]).unwrap());
    let b = handle.join().unwrap();
    assert_eq!(b.type_name(), "B");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every constructor's output is an instance of that constructor and of
    /// the family, and of no sibling constructor
    #[test]
    fn test_instances_belong_to_constructor_and_family(
        (definition, variants) in arb_definition()
    ) {
        let family = make_sum(definition);
        prop_assert_eq!(family.len(), variants.len());

        for (name, _) in &variants {
            let value = family[name.as_str()].call(&[]).unwrap();
            prop_assert!(value.is_instance_of(&family));
            for constructor in family.constructors() {
                prop_assert_eq!(value.is_instance_of(constructor), constructor.name() == name);
            }
        }
    }

    /// Field-list constructors map positional arguments onto field names
    #[test]
    fn test_positional_arguments_become_fields(
        fields in arb_field_list(),
        args in prop::collection::vec(arb_value(), 0..8)
    ) {
        let family = make_sum(VariantDefinition::new().fields("V", fields.clone()));
        let value = family["V"].call(&args).unwrap();
        let instance = value.as_instance().unwrap();

        let names: Vec<&str> = instance.fields().names().collect();
        prop_assert_eq!(names, fields.iter().map(String::as_str).collect::<Vec<_>>());
        for (i, field) in fields.iter().enumerate() {
            let expected = args.get(i).cloned().unwrap_or(Value::Undefined);
            let actual = instance.get(field).unwrap();
            // NaN doubles are never equal to themselves
            prop_assert_eq!(format!("{:?}", actual), format!("{:?}", expected));
        }
    }

    /// Builders fully determine the instance fields
    #[test]
    fn test_builder_output_is_instance_fields(
        names in arb_field_list(),
        seed in any::<i64>()
    ) {
        let built = names.clone();
        let family = make_sum(VariantDefinition::new().builder("B", move |_| {
            Ok(built.iter().enumerate().map(|(i, n)| (n.clone(), seed.wrapping_add(i as i64))).collect())
        }));

        let value = family["B"].call(&[]).unwrap();
        let fields = value.as_instance().unwrap().fields();
        prop_assert_eq!(fields.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(fields.get(name), Some(&Value::Int(seed.wrapping_add(i as i64))));
        }
    }
}
