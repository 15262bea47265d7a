//! The `RecordStore` trait and its `Arc` forwarding impl.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::MissingRecordPolicy;
use crate::error::StoreError;
use crate::record::Records;

/// Durable home of a heterogeneous, identifier-keyed record collection.
///
/// ## Semantics
///
/// - `load_all` returns the full collection; an absent backing resource is an
///   empty collection, not an error.
/// - `save_all` replaces the full collection.
/// - `writer_lock` serializes load-modify-save cycles **within this process**.
///   It does not protect against other processes writing the same resource.
pub trait RecordStore: Send + Sync {
    fn load_all(&self) -> Result<Records, StoreError>;

    fn save_all(&self, records: &Records) -> Result<(), StoreError>;

    fn writer_lock(&self) -> &Mutex<()>;

    /// What a save does when its identifier has gone missing from the store.
    fn missing_record_policy(&self) -> MissingRecordPolicy {
        MissingRecordPolicy::Skip
    }

    /// Acquire the writer lock.
    ///
    /// The lock guards no data, so a poisoned lock is simply taken over.
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer_lock()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn load_all(&self) -> Result<Records, StoreError> {
        (**self).load_all()
    }

    fn save_all(&self, records: &Records) -> Result<(), StoreError> {
        (**self).save_all(records)
    }

    fn writer_lock(&self) -> &Mutex<()> {
        (**self).writer_lock()
    }

    fn missing_record_policy(&self) -> MissingRecordPolicy {
        (**self).missing_record_policy()
    }
}
