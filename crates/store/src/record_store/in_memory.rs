//! In-memory backend for tests and benchmarks.

use std::sync::{Mutex, RwLock};

use crate::config::MissingRecordPolicy;
use crate::error::StoreError;
use crate::record::Records;

use super::r#trait::RecordStore;

/// In-memory record store.
///
/// Intended for tests/dev. Same load/replace-all semantics as the file store,
/// without touching disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
    writer: Mutex<()>,
    missing_record: MissingRecordPolicy,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_record(mut self, policy: MissingRecordPolicy) -> Self {
        self.missing_record = policy;
        self
    }
}

impl RecordStore for InMemoryStore {
    fn load_all(&self) -> Result<Records, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn save_all(&self, records: &Records) -> Result<(), StoreError> {
        let mut current = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        *current = records.clone();
        Ok(())
    }

    fn writer_lock(&self) -> &Mutex<()> {
        &self.writer
    }

    fn missing_record_policy(&self) -> MissingRecordPolicy {
        self.missing_record
    }
}
