//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures raised by the entity contract
/// (bad arguments, illegal lifecycle transitions, type tags that do not line
/// up). Storage failures belong to the store crate. A lookup that finds
/// nothing is `Ok(None)`, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An argument was absent or malformed (e.g. an identifier that does not parse).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the entity's current lifecycle state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A stored value was requested as a different concrete type than it was saved as.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
