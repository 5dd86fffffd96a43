// Dispatch on strict value equality

use crate::data::StrictEq;
use crate::error::UnmatchedValue;
use std::fmt;

/// Wildcard marker for equality cases. It is not a domain value, so it can
/// never be confused with a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Otherwise;

/// The wildcard candidate: an equality case listing it matches any target.
pub const OTHERWISE: Otherwise = Otherwise;

/// One candidate of an equality case
#[derive(Debug, Clone)]
pub enum Candidate<T> {
    Is(T),
    Otherwise,
}

impl<T: StrictEq> Candidate<T> {
    pub fn matches(&self, target: &T) -> bool {
        match self {
            Candidate::Is(value) => value.strict_eq(target),
            Candidate::Otherwise => true,
        }
    }
}

impl<T> From<Otherwise> for Candidate<T> {
    fn from(_: Otherwise) -> Self {
        Candidate::Otherwise
    }
}

/// One entry of an equality case list: candidates followed by a handler.
///
/// An entry with no candidates never matches.
pub struct EqCase<'a, T, R> {
    candidates: Vec<Candidate<T>>,
    handler: Box<dyn FnOnce(T) -> R + 'a>,
}

impl<'a, T, R> EqCase<'a, T, R> {
    pub fn new<F>(candidates: Vec<Candidate<T>>, handler: F) -> Self
    where
        F: FnOnce(T) -> R + 'a,
    {
        EqCase {
            candidates,
            handler: Box::new(handler),
        }
    }

    /// Entry matching any of `values`
    pub fn values<I, F>(values: I, handler: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
        F: FnOnce(T) -> R + 'a,
    {
        let candidates = values
            .into_iter()
            .map(|v| Candidate::Is(v.into()))
            .collect();
        EqCase::new(candidates, handler)
    }

    /// Entry matching any target that reaches it
    pub fn otherwise<F>(handler: F) -> Self
    where
        F: FnOnce(T) -> R + 'a,
    {
        EqCase::new(vec![Candidate::Otherwise], handler)
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }
}

/// Invoke the handler of the first entry with a candidate strictly equal to
/// `target`, or with the [`OTHERWISE`] wildcard.
pub fn caseof_eq<'a, T, R, I>(target: T, cases: I) -> Result<R, UnmatchedValue>
where
    T: StrictEq + fmt::Display,
    I: IntoIterator<Item = EqCase<'a, T, R>>,
{
    for (index, case) in cases.into_iter().enumerate() {
        let EqCase {
            candidates,
            handler,
        } = case;
        if candidates.iter().any(|c| c.matches(&target)) {
            tracing::trace!(case = index, "equality case matched");
            return Ok(handler(target));
        }
    }

    tracing::trace!(value = %target, "no equality case matched");
    Err(UnmatchedValue {
        target: target.to_string(),
    })
}
