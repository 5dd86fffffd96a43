// Error types for sumcase

use std::error::Error;
use std::fmt;

/// Failure raised by a user-supplied variant builder. Returned to the caller
/// of the constructor exactly as the builder produced it.
pub type BuilderError = Box<dyn Error + Send + Sync + 'static>;

pub type Result<T, E = SumError> = std::result::Result<T, E>;

/// Aggregate of every failure sumcase can report
#[derive(Debug)]
pub enum SumError {
    UnmatchedType(UnmatchedType),
    UnmatchedValue(UnmatchedValue),
    AbstractBase(AbstractBaseInvocation),
    Builder(BuilderError),
    Definition(DefinitionError),
}

/// No type case accepted the value and no default case was present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedType {
    pub tried: Vec<String>,
}

/// No equality case accepted the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedValue {
    pub target: String,
}

/// The family base of a sum type was invoked as a constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractBaseInvocation;

/// A declarative variant definition could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    InvalidShape { variant: String, reason: String },
    Malformed(String),
}

impl SumError {
    /// Whether the host language would surface this as a type error
    /// rather than a generic error.
    pub fn is_type_error(&self) -> bool {
        matches!(self, SumError::UnmatchedType(_) | SumError::AbstractBase(_))
    }
}

// Error trait implementations

impl Error for SumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SumError::UnmatchedType(e) => Some(e),
            SumError::UnmatchedValue(e) => Some(e),
            SumError::AbstractBase(e) => Some(e),
            SumError::Builder(e) => Some(&**e),
            SumError::Definition(e) => Some(e),
        }
    }
}

impl Error for UnmatchedType {}
impl Error for UnmatchedValue {}
impl Error for AbstractBaseInvocation {}
impl Error for DefinitionError {}

// Display implementations

impl fmt::Display for SumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumError::UnmatchedType(e) => write!(f, "TypeError: {}", e),
            SumError::UnmatchedValue(e) => write!(f, "Error: {}", e),
            SumError::AbstractBase(e) => write!(f, "TypeError: {}", e),
            SumError::Builder(e) => write!(f, "{}", e),
            SumError::Definition(e) => write!(f, "Definition error: {}", e),
        }
    }
}

impl fmt::Display for UnmatchedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unmatched instance. Must be one of {}", self.tried.join(", "))
    }
}

impl fmt::Display for UnmatchedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unmatched case for {}", self.target)
    }
}

impl fmt::Display for AbstractBaseInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot call base constructor")
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::InvalidShape { variant, reason } => {
                write!(f, "Invalid shape for variant '{}': {}", variant, reason)
            }
            DefinitionError::Malformed(msg) => {
                write!(f, "Malformed definition: {}", msg)
            }
        }
    }
}

// Convenience From implementations for error composition

impl From<UnmatchedType> for SumError {
    fn from(error: UnmatchedType) -> Self {
        SumError::UnmatchedType(error)
    }
}

impl From<UnmatchedValue> for SumError {
    fn from(error: UnmatchedValue) -> Self {
        SumError::UnmatchedValue(error)
    }
}

impl From<AbstractBaseInvocation> for SumError {
    fn from(error: AbstractBaseInvocation) -> Self {
        SumError::AbstractBase(error)
    }
}

impl From<BuilderError> for SumError {
    fn from(error: BuilderError) -> Self {
        SumError::Builder(error)
    }
}

impl From<DefinitionError> for SumError {
    fn from(error: DefinitionError) -> Self {
        SumError::Definition(error)
    }
}

impl From<serde_json::Error> for DefinitionError {
    fn from(error: serde_json::Error) -> Self {
        DefinitionError::Malformed(error.to_string())
    }
}
