//! Store and persistence errors.

use std::path::PathBuf;

use recordkeep_core::{DomainError, EntityId};
use thiserror::Error;

/// Result type for entity persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Storage-level failure.
///
/// These are **infrastructure errors** (IO, on-disk format) as opposed to
/// domain errors (bad arguments, illegal lifecycle transitions). None of them
/// is recovered internally; a corrupt file stays corrupt until someone fixes it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} store file {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store file {} has format version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("failed to encode `{kind}` record: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode store document for {}: {source}", path.display())]
    EncodeDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode `{kind}` record {id}: {source}")]
    Decode {
        kind: String,
        id: EntityId,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Error returned by `Persist` operations: either the entity contract was
/// violated, or the store failed underneath it.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PersistError {
    /// The domain error, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            PersistError::Domain(e) => Some(e),
            PersistError::Store(_) => None,
        }
    }
}
