// Dispatch on runtime type membership

use crate::data::Value;
use crate::error::UnmatchedType;
use crate::sum::{VariantConstructor, VariantFamily};

/// Runtime type membership of a value against a type identity `Ty`
pub trait InstanceOf<Ty: ?Sized> {
    fn is_instance_of(&self, ty: &Ty) -> bool;
}

/// Display name of a type identity, used in mismatch diagnostics
pub trait TypeName {
    fn type_name(&self) -> &str;
}

/// A type identity a [`Value`] can be tested against: either a whole family
/// (its abstract base) or one of its variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Family(VariantFamily),
    Variant(VariantConstructor),
}

/// What a type case accepts
#[derive(Debug, Clone)]
pub enum MatchSpec<Ty> {
    /// Accepts every value
    Default,
    /// Accepts instances of any of the listed types
    Types(Vec<Ty>),
}

/// One entry of a type case list
pub struct TypeCase<'a, V, Ty, R> {
    spec: MatchSpec<Ty>,
    handler: Box<dyn FnOnce(V) -> R + 'a>,
}

impl<'a, V, Ty, R> TypeCase<'a, V, Ty, R> {
    pub fn new<F>(spec: MatchSpec<Ty>, handler: F) -> Self
    where
        F: FnOnce(V) -> R + 'a,
    {
        TypeCase {
            spec,
            handler: Box::new(handler),
        }
    }

    /// Case for instances of a single type
    pub fn of<F>(ty: impl Into<Ty>, handler: F) -> Self
    where
        F: FnOnce(V) -> R + 'a,
    {
        TypeCase::new(MatchSpec::Types(vec![ty.into()]), handler)
    }

    /// Case for instances of any of `types`
    pub fn any_of<I, F>(types: I, handler: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Ty>,
        F: FnOnce(V) -> R + 'a,
    {
        let types = types.into_iter().map(Into::into).collect();
        TypeCase::new(MatchSpec::Types(types), handler)
    }

    /// Case that accepts any value that reaches it
    pub fn default_case<F>(handler: F) -> Self
    where
        F: FnOnce(V) -> R + 'a,
    {
        TypeCase::new(MatchSpec::Default, handler)
    }

    pub fn spec(&self) -> &MatchSpec<Ty> {
        &self.spec
    }
}

/// Invoke the handler of the first case that accepts `value`.
///
/// Cases are tried in order and the first match wins, so cases may overlap.
/// When nothing matches, the error lists the names of every type that was
/// tried.
pub fn caseof<'a, V, Ty, R, I>(value: V, cases: I) -> Result<R, UnmatchedType>
where
    V: InstanceOf<Ty>,
    Ty: TypeName,
    I: IntoIterator<Item = TypeCase<'a, V, Ty, R>>,
{
    let mut tried = Vec::new();

    for (index, case) in cases.into_iter().enumerate() {
        let TypeCase { spec, handler } = case;
        let matched = match &spec {
            MatchSpec::Default => true,
            MatchSpec::Types(types) => {
                if types.iter().any(|ty| value.is_instance_of(ty)) {
                    true
                } else {
                    tried.extend(types.iter().map(|ty| ty.type_name().to_string()));
                    false
                }
            }
        };

        if matched {
            tracing::trace!(case = index, "type case matched");
            return Ok(handler(value));
        }
    }

    tracing::trace!(tried = tried.len(), "no type case matched");
    Err(UnmatchedType { tried })
}

impl TypeName for TypeRef {
    fn type_name(&self) -> &str {
        match self {
            TypeRef::Family(family) => family.name(),
            TypeRef::Variant(constructor) => constructor.name(),
        }
    }
}

impl TypeName for VariantFamily {
    fn type_name(&self) -> &str {
        self.name()
    }
}

impl TypeName for VariantConstructor {
    fn type_name(&self) -> &str {
        self.name()
    }
}

impl InstanceOf<VariantFamily> for Value {
    fn is_instance_of(&self, family: &VariantFamily) -> bool {
        family.contains(self)
    }
}

impl InstanceOf<VariantConstructor> for Value {
    fn is_instance_of(&self, constructor: &VariantConstructor) -> bool {
        constructor.is_constructor_of(self)
    }
}

impl InstanceOf<TypeRef> for Value {
    fn is_instance_of(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Family(family) => self.is_instance_of(family),
            TypeRef::Variant(constructor) => self.is_instance_of(constructor),
        }
    }
}

impl<V, Ty> InstanceOf<Ty> for &V
where
    V: InstanceOf<Ty> + ?Sized,
    Ty: ?Sized,
{
    fn is_instance_of(&self, ty: &Ty) -> bool {
        (**self).is_instance_of(ty)
    }
}

impl From<VariantFamily> for TypeRef {
    fn from(family: VariantFamily) -> Self {
        TypeRef::Family(family)
    }
}

impl From<&VariantFamily> for TypeRef {
    fn from(family: &VariantFamily) -> Self {
        TypeRef::Family(family.clone())
    }
}

impl From<VariantConstructor> for TypeRef {
    fn from(constructor: VariantConstructor) -> Self {
        TypeRef::Variant(constructor)
    }
}

impl From<&VariantConstructor> for TypeRef {
    fn from(constructor: &VariantConstructor) -> Self {
        TypeRef::Variant(constructor.clone())
    }
}
