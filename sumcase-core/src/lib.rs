//! Sum types and pattern matching for dynamically-typed host languages.
//!
//! [`make_sum`] builds a family of tagged variant constructors over the
//! dynamic [`Value`] model. [`caseof`] dispatches on which variant (or
//! family) a value belongs to, and [`caseof_eq`] dispatches on strict value
//! equality with an [`OTHERWISE`] wildcard.

pub mod caseof;
pub mod caseof_eq;
pub mod data;
pub mod definition;
pub mod error;
pub mod sum;

pub use caseof::{caseof, InstanceOf, MatchSpec, TypeCase, TypeName, TypeRef};
pub use caseof_eq::{caseof_eq, Candidate, EqCase, Otherwise, OTHERWISE};
pub use data::{Field, Record, StrictEq, Value};
pub use definition::{Builder, Shape, VariantDefinition};
pub use error::{
    AbstractBaseInvocation, BuilderError, DefinitionError, Result, SumError, UnmatchedType,
    UnmatchedValue,
};
pub use sum::{make_sum, FamilyId, Instance, VariantConstructor, VariantFamily};
