//! `recordkeep-store` — file-backed persistence for entities.
//!
//! The store keeps every entity of every type in one keyed collection, loads
//! it whole, and rewrites it whole. Entities get `save` / `delete` / `find`
//! through the [`Persist`] extension trait.

pub mod config;
pub mod error;
pub mod persist;
pub mod record;
pub mod record_store;

pub use config::{MissingRecordPolicy, StoreConfig, WriteMode};
pub use error::{PersistError, PersistResult, StoreError};
pub use persist::{Persist, SaveOutcome};
pub use record::{Records, StoredRecord};
pub use record_store::{FileStore, InMemoryStore, RecordStore};
