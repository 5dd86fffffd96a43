// Declarative variant definitions

use crate::data::{Record, Value};
use crate::error::{BuilderError, DefinitionError};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::sync::Arc;

/// Computes the fields of a variant from its constructor arguments
pub type Builder = Arc<dyn Fn(&[Value]) -> Result<Record, BuilderError> + Send + Sync>;

/// How a variant turns constructor arguments into fields
#[derive(Clone)]
pub enum Shape {
    /// Positional arguments are assigned to these names, in order
    Fields(Vec<String>),
    /// Fields are whatever the builder returns
    Builder(Builder),
}

/// Ordered mapping from variant name to [`Shape`].
///
/// Names are unique: defining a name twice replaces the earlier shape and
/// keeps the position of the first definition.
#[derive(Clone, Default)]
pub struct VariantDefinition {
    name: Option<String>,
    variants: Vec<(String, Shape)>,
}

impl VariantDefinition {
    pub fn new() -> Self {
        VariantDefinition::default()
    }

    /// Give the family a display name, used when the family itself is listed
    /// in a type match.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, shape: Shape) {
        let name = name.into();
        match self.variants.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = shape,
            None => self.variants.push((name, shape)),
        }
    }

    /// Add a variant whose positional arguments become the given fields
    pub fn fields<I, S>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.insert(name, Shape::Fields(fields));
        self
    }

    /// Add a variant whose fields are computed by `builder`
    pub fn builder<F>(mut self, name: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Record, BuilderError> + Send + Sync + 'static,
    {
        self.insert(name, Shape::Builder(Arc::new(builder)));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.variants.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Read field-list variants from a JSON object such as
    /// `{"Leaf": [], "Node": ["left", "right"]}`. Variants keep document order.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let entries: OrderedEntries = serde_json::from_str(json)?;
        Self::from_entries(entries.0)
    }

    fn from_entries(entries: Vec<(String, serde_json::Value)>) -> Result<Self, DefinitionError> {
        let mut definition = VariantDefinition::new();
        for (variant, shape) in entries {
            let fields = match shape {
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Ok(s),
                        other => Err(DefinitionError::InvalidShape {
                            variant: variant.clone(),
                            reason: format!("field names must be strings, got {}", other),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => {
                    return Err(DefinitionError::InvalidShape {
                        variant,
                        reason: format!("expected a list of field names, got {}", other),
                    })
                }
            };
            definition.insert(variant, Shape::Fields(fields));
        }
        Ok(definition)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Shape::Builder(_) => write!(f, "Builder(..)"),
        }
    }
}

impl fmt::Debug for VariantDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDefinition")
            .field("name", &self.name)
            .field("variants", &self.variants)
            .finish()
    }
}

/// JSON object entries in document order
struct OrderedEntries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map from variant name to a list of field names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, shape)) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push((name, shape));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for VariantDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = OrderedEntries::deserialize(deserializer)?;
        VariantDefinition::from_entries(entries.0).map_err(de::Error::custom)
    }
}
