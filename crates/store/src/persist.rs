//! Save / delete / find for any entity.
//!
//! Each operation is one logical unit against a [`RecordStore`]: take the
//! writer lock, load the whole collection, change one record in memory, write
//! the whole collection back.

use serde::Serialize;
use serde::de::DeserializeOwned;

use recordkeep_core::{DomainError, Entity, EntityId, LookupKey};

use crate::config::MissingRecordPolicy;
use crate::error::{PersistError, PersistResult};
use crate::record::{Records, StoredRecord};
use crate::record_store::RecordStore;

/// What a [`Persist::save`] call did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was written under this identifier.
    Inserted(EntityId),
    /// The existing record under this identifier was replaced.
    Updated(EntityId),
    /// The entity's identifier is no longer in the store; nothing was written.
    SkippedMissing(EntityId),
}

impl SaveOutcome {
    pub fn id(&self) -> EntityId {
        match *self {
            SaveOutcome::Inserted(id)
            | SaveOutcome::Updated(id)
            | SaveOutcome::SkippedMissing(id) => id,
        }
    }

    pub fn wrote(&self) -> bool {
        !matches!(self, SaveOutcome::SkippedMissing(_))
    }
}

/// Persistence operations, available on every serializable entity.
///
/// ```ignore
/// use recordkeep_store::{FileStore, Persist};
///
/// let store = FileStore::open("records.json");
/// let mut customer = Customer::new("Bob", "Jones", address);
/// customer.save(&store)?;                       // assigns an identifier
/// let found = Customer::find(&store, customer.identity())?;
/// customer.delete(&store)?;                     // back to unsaved
/// ```
pub trait Persist: Entity + Serialize + DeserializeOwned {
    /// Insert (first save) or replace (later saves) this entity's record.
    ///
    /// An unsaved entity receives a fresh identifier; if writing fails the
    /// entity is left unsaved. A saved entity whose record has disappeared is
    /// handled according to the store's [`MissingRecordPolicy`].
    fn save<S>(&mut self, store: &S) -> PersistResult<SaveOutcome>
    where
        S: RecordStore + ?Sized,
    {
        let _guard = store.lock_writer();
        let mut records = store.load_all()?;

        let Some(id) = self.id() else {
            let id = EntityId::generate();
            self.identity_mut().assign(id);
            if let Err(err) = write_record(store, &mut records, id, &*self) {
                self.identity_mut().clear();
                return Err(err);
            }
            tracing::info!(kind = Self::KIND, %id, "inserted record");
            return Ok(SaveOutcome::Inserted(id));
        };

        let stored_kind = records.get(id).map(|r| r.kind().to_string());
        match stored_kind.as_deref() {
            Some(kind) if kind != Self::KIND => {
                Err(DomainError::type_mismatch(Self::KIND, kind).into())
            }
            Some(_) => {
                write_record(store, &mut records, id, &*self)?;
                tracing::debug!(kind = Self::KIND, %id, "updated record");
                Ok(SaveOutcome::Updated(id))
            }
            None => match store.missing_record_policy() {
                MissingRecordPolicy::Skip => {
                    tracing::warn!(kind = Self::KIND, %id, "record missing from store; save skipped");
                    Ok(SaveOutcome::SkippedMissing(id))
                }
                MissingRecordPolicy::Insert => {
                    write_record(store, &mut records, id, &*self)?;
                    tracing::info!(kind = Self::KIND, %id, "re-inserted missing record");
                    Ok(SaveOutcome::Inserted(id))
                }
            },
        }
    }

    /// Remove this entity's record and reset the entity to unsaved.
    ///
    /// Fails with `InvalidOperation` if the entity was never saved. Deleting an
    /// identifier the store no longer holds still rewrites the store.
    fn delete<S>(&mut self, store: &S) -> PersistResult<()>
    where
        S: RecordStore + ?Sized,
    {
        let Some(id) = self.id() else {
            return Err(DomainError::invalid_operation(format!(
                "cannot delete a {} that has not been saved",
                Self::KIND
            ))
            .into());
        };

        let _guard = store.lock_writer();
        let mut records = store.load_all()?;
        let removed = records.remove(id).is_some();
        store.save_all(&records)?;

        self.identity_mut().clear();
        tracing::info!(kind = Self::KIND, %id, removed, "deleted record");
        Ok(())
    }

    /// Look up a stored entity by identifier or by its string form.
    ///
    /// Empty or missing keys and unknown identifiers yield `Ok(None)`. A
    /// malformed string is `InvalidArgument`; a record stored as another type
    /// is `TypeMismatch`.
    fn find<S, K>(store: &S, key: K) -> PersistResult<Option<Self>>
    where
        S: RecordStore + ?Sized,
        K: LookupKey,
    {
        let Some(id) = key.into_entity_id()? else {
            return Ok(None);
        };

        let records = {
            let _guard = store.lock_writer();
            store.load_all()?
        };

        records.get(id).map(|record| record.decode(id)).transpose()
    }
}

impl<T> Persist for T where T: Entity + Serialize + DeserializeOwned {}

fn write_record<S, T>(store: &S, records: &mut Records, id: EntityId, entity: &T) -> PersistResult<()>
where
    S: RecordStore + ?Sized,
    T: Entity + Serialize,
{
    records.insert(id, StoredRecord::encode(entity)?);
    store.save_all(records).map_err(PersistError::from)
}
