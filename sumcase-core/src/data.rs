// Core value types for sumcase

use crate::sum::Instance;
use bstr::{BString, ByteSlice};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A dynamic host-language value.
///
/// Primitives are held inline. Arrays, records and variant instances are
/// reference counted, so cloning a `Value` shares the underlying object and
/// [`StrictEq`] can tell two handles to the same object apart from two equal
/// objects.
///
/// `==` compares structurally and is meant for inspection and tests; the
/// matchers only ever use [`StrictEq`].
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(BString),
    Array(Arc<Vec<Value>>),
    Record(Arc<Record>),
    Instance(Instance),
}

/// Named field in a record
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// Ordered collection of uniquely named fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

/// Strict equality: value comparison for primitives, identity for objects.
pub trait StrictEq {
    fn strict_eq(&self, other: &Self) -> bool;
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Set `name` to `value`. An existing field keeps its position and has
    /// its value replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Builder-style [`Record::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Copy every field of `other` onto `self`, overwriting same-named fields.
    pub fn assign(&mut self, other: Record) {
        for field in other.fields {
            self.insert(field.name, field.value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value.into());
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Value {
    pub fn str(s: impl Into<BString>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Arc::new(values))
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Arc::new(record))
    }

    /// Name of the value's runtime type, as a host language would report it
    pub fn type_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Instance(instance) => instance.variant(),
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&[u8]> {
        match self {
            Value::Str(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// Look up a field on a record or an instance
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(name),
            Value::Instance(instance) => instance.get(name),
            _ => None,
        }
    }

    /// Convert a JSON document into a host value. Objects become records,
    /// integral numbers that fit in an `i64` become `Int`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::str(s),
            serde_json::Value::Array(values) => {
                Value::array(values.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::record(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl StrictEq for Value {
    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // NaN is never strictly equal to anything, itself included
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.same_object(b),
            _ => false,
        }
    }
}

impl<T: StrictEq + ?Sized> StrictEq for &T {
    fn strict_eq(&self, other: &Self) -> bool {
        (**self).strict_eq(*other)
    }
}

macro_rules! strict_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StrictEq for $ty {
                #[inline]
                fn strict_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

strict_eq_by_value!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    str, String, BString,
);

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => {
                a.constructor() == b.constructor() && a.fields() == b.fields()
            }
            _ => false,
        }
    }
}

// Conversions from Rust values

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::record(record)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

// Rendering

/// Doubles render as a dynamic host prints numbers: plain decimals in
/// `[1e-6, 1e21)`, exponent form with an explicit sign outside it.
fn fmt_double(d: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let magnitude = d.abs();
    if d.is_nan() {
        write!(f, "NaN")
    } else if d.is_infinite() {
        write!(f, "{}Infinity", if d < 0.0 { "-" } else { "" })
    } else if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let exp = format!("{:e}", d);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => write!(f, "{}", exp),
        }
    } else {
        write!(f, "{}", d)
    }
}

fn fmt_fields<'a>(
    fields: impl Iterator<Item = &'a Field>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, field) in fields.enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{}{}: {}", sep, field.name, field.value)?;
    }
    write!(f, " }}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) => fmt_double(*d, f),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
            Value::Record(record) if record.is_empty() => write!(f, "{{}}"),
            Value::Record(record) => fmt_fields(record.iter(), f),
            Value::Instance(instance) if instance.fields().is_empty() => {
                write!(f, "{}", instance.variant())
            }
            Value::Instance(instance) => {
                write!(f, "{} ", instance.variant())?;
                fmt_fields(instance.fields().iter(), f)
            }
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for field in self.iter() {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Str(s) => serializer.serialize_str(&s.to_str_lossy()),
            Value::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values.iter() {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Record(record) => record.serialize(serializer),
            Value::Instance(instance) => {
                let fields = instance.fields();
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("tag", instance.variant())?;
                for field in fields.iter() {
                    map.serialize_entry(&field.name, &field.value)?;
                }
                map.end()
            }
        }
    }
}
