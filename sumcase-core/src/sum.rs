// Sum type families - runtime-tagged variant constructors

use crate::data::{Record, Value};
use crate::definition::{Builder, Shape, VariantDefinition};
use crate::error::{AbstractBaseInvocation, BuilderError};
use std::fmt;
use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_FAMILY_ID: AtomicU64 = AtomicU64::new(0);

/// Display name of a family built from an unnamed definition
pub const ANONYMOUS_FAMILY: &str = "Sum";

/// Identity of one family. Two families built from identical definitions
/// still have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FamilyId(u64);

impl FamilyId {
    fn fresh() -> Self {
        FamilyId(NEXT_FAMILY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Turns constructor arguments into the fields of a new instance
#[derive(Clone)]
enum Assigner {
    Positional(Vec<String>),
    Custom(Builder),
}

impl Assigner {
    fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Fields(fields) => Assigner::Positional(fields.clone()),
            Shape::Builder(builder) => Assigner::Custom(Arc::clone(builder)),
        }
    }

    fn assign(&self, args: &[Value]) -> Result<Record, BuilderError> {
        match self {
            Assigner::Positional(names) => Ok(names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), args.get(i).cloned().unwrap_or(Value::Undefined)))
                .collect()),
            Assigner::Custom(builder) => builder(args),
        }
    }
}

struct ConstructorData {
    name: String,
    family: FamilyId,
    family_name: Arc<str>,
    assigner: Assigner,
}

/// Constructor for one variant of a family.
///
/// Handles are cheap to clone and compare by identity.
#[derive(Clone)]
pub struct VariantConstructor(Arc<ConstructorData>);

struct InstanceData {
    constructor: VariantConstructor,
    fields: Record,
}

/// A value built by a [`VariantConstructor`]
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

struct FamilyData {
    id: FamilyId,
    name: Arc<str>,
    constructors: Vec<VariantConstructor>,
}

/// The abstract base of a sum type together with its variant constructors
#[derive(Clone)]
pub struct VariantFamily(Arc<FamilyData>);

/// Build a family with one constructor per variant of `definition`, in
/// definition order.
pub fn make_sum(definition: VariantDefinition) -> VariantFamily {
    let id = FamilyId::fresh();
    let name: Arc<str> = Arc::from(definition.name().unwrap_or(ANONYMOUS_FAMILY));

    let constructors: Vec<VariantConstructor> = definition
        .iter()
        .map(|(variant, shape)| {
            VariantConstructor(Arc::new(ConstructorData {
                name: variant.to_string(),
                family: id,
                family_name: Arc::clone(&name),
                assigner: Assigner::from_shape(shape),
            }))
        })
        .collect();

    tracing::debug!(
        family = %name,
        variants = constructors.len(),
        "built variant family"
    );

    VariantFamily(Arc::new(FamilyData {
        id,
        name,
        constructors,
    }))
}

impl VariantFamily {
    pub fn id(&self) -> FamilyId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invoke the family base as a constructor. The base is abstract, so this
    /// always fails.
    pub fn call(&self, _args: &[Value]) -> Result<Value, AbstractBaseInvocation> {
        Err(AbstractBaseInvocation)
    }

    pub fn get(&self, variant: &str) -> Option<&VariantConstructor> {
        self.0.constructors.iter().find(|c| c.name() == variant)
    }

    /// Construct `variant` from `args`; `None` if the family has no such
    /// variant.
    pub fn construct(&self, variant: &str, args: &[Value]) -> Option<Result<Value, BuilderError>> {
        self.get(variant).map(|c| c.call(args))
    }

    pub fn constructors(&self) -> &[VariantConstructor] {
        &self.0.constructors
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.constructors.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.0.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.constructors.is_empty()
    }

    /// Whether `value` was built by one of this family's constructors
    pub fn contains(&self, value: &Value) -> bool {
        value
            .as_instance()
            .is_some_and(|instance| instance.family_id() == self.id())
    }
}

impl Index<&str> for VariantFamily {
    type Output = VariantConstructor;

    /// `family["Name"]` looks up a constructor by variant name.
    ///
    /// # Panics
    ///
    /// Panics if the family has no variant with that name. Use
    /// [`VariantFamily::get`] or [`VariantFamily::construct`] for a fallible
    /// lookup.
    fn index(&self, variant: &str) -> &VariantConstructor {
        match self.get(variant) {
            Some(constructor) => constructor,
            None => panic!("{} has no variant named {}", self.name(), variant),
        }
    }
}

impl PartialEq for VariantFamily {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariantFamily {}

impl fmt::Debug for VariantFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantFamily")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("variants", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl VariantConstructor {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn family_id(&self) -> FamilyId {
        self.0.family
    }

    pub fn family_name(&self) -> &str {
        &self.0.family_name
    }

    /// Number of positional fields, or `None` when a builder computes them
    pub fn arity(&self) -> Option<usize> {
        match &self.0.assigner {
            Assigner::Positional(names) => Some(names.len()),
            Assigner::Custom(_) => None,
        }
    }

    /// Build a new instance. Builder failures are returned as the builder
    /// produced them.
    pub fn call(&self, args: &[Value]) -> Result<Value, BuilderError> {
        let assigned = self.0.assigner.assign(args)?;
        let mut fields = Record::new();
        fields.assign(assigned);
        tracing::trace!(variant = %self.name(), fields = fields.len(), "constructed instance");
        Ok(Value::Instance(Instance(Arc::new(InstanceData {
            constructor: self.clone(),
            fields,
        }))))
    }

    /// Whether `value` was built by this constructor
    pub fn is_constructor_of(&self, value: &Value) -> bool {
        value
            .as_instance()
            .is_some_and(|instance| instance.constructor() == self)
    }
}

impl PartialEq for VariantConstructor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariantConstructor {}

impl fmt::Debug for VariantConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariantConstructor({}.{})", self.family_name(), self.name())
    }
}

impl Instance {
    pub fn constructor(&self) -> &VariantConstructor {
        &self.0.constructor
    }

    /// Name of the variant this instance belongs to
    pub fn variant(&self) -> &str {
        self.0.constructor.name()
    }

    pub fn family_id(&self) -> FamilyId {
        self.0.constructor.family_id()
    }

    pub fn fields(&self) -> &Record {
        &self.0.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.fields.get(field)
    }

    /// Whether both handles refer to the same allocation
    pub fn same_object(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("variant", &self.variant())
            .field("fields", self.fields())
            .finish()
    }
}
