//! Type-tagged record envelope and the in-memory record collection.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use recordkeep_core::{DomainError, Entity, EntityId};

use crate::error::{PersistResult, StoreError};

/// One stored value: the concrete type's tag plus its serialized fields.
///
/// Many unrelated entity types share one collection, so every payload carries
/// `kind` (the type's [`Entity::KIND`]) to be decoded back into the right type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    kind: String,
    payload: JsonValue,
}

impl StoredRecord {
    pub fn encode<T>(entity: &T) -> Result<Self, StoreError>
    where
        T: Entity + Serialize,
    {
        let payload = serde_json::to_value(entity).map_err(|source| StoreError::Encode {
            kind: T::KIND,
            source,
        })?;

        Ok(Self {
            kind: T::KIND.to_string(),
            payload,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    pub fn is_kind<T: Entity>(&self) -> bool {
        self.kind == T::KIND
    }

    /// Decode the payload as `T`, stamping `id` on the result.
    ///
    /// Fails with `TypeMismatch` if the record was stored as another type.
    pub fn decode<T>(&self, id: EntityId) -> PersistResult<T>
    where
        T: Entity + DeserializeOwned,
    {
        if !self.is_kind::<T>() {
            return Err(DomainError::type_mismatch(T::KIND, self.kind.clone()).into());
        }

        let mut entity: T =
            serde_json::from_value(self.payload.clone()).map_err(|source| StoreError::Decode {
                kind: self.kind.clone(),
                id,
                source,
            })?;
        entity.identity_mut().assign(id);
        Ok(entity)
    }
}

/// Whole store contents: at most one record per identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Records(BTreeMap<EntityId, StoredRecord>);

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&StoredRecord> {
        self.0.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains_key(&id)
    }

    /// Insert or replace the record under `id`.
    pub fn insert(&mut self, id: EntityId, record: StoredRecord) -> Option<StoredRecord> {
        self.0.insert(id, record)
    }

    /// Remove the record under `id`; absent keys are a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<StoredRecord> {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of records stored as `T`.
    pub fn count_kind<T: Entity>(&self) -> usize {
        self.0.values().filter(|r| r.is_kind::<T>()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordkeep_core::{CopyValues, Identity};

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Tag {
        #[serde(default)]
        identity: Identity,
        label: String,
    }

    impl CopyValues for Tag {
        fn copy_values(&mut self, source: &Self) {
            self.identity = source.identity;
            self.label = source.label.clone();
        }
    }

    impl Entity for Tag {
        const KIND: &'static str = "tag";

        fn identity(&self) -> &Identity {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Label {
        #[serde(default)]
        identity: Identity,
    }

    impl CopyValues for Label {
        fn copy_values(&mut self, source: &Self) {
            self.identity = source.identity;
        }
    }

    impl Entity for Label {
        const KIND: &'static str = "label";

        fn identity(&self) -> &Identity {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
    }

    fn tag(label: &str) -> Tag {
        Tag {
            identity: Identity::unset(),
            label: label.to_string(),
        }
    }

    #[test]
    fn encode_tags_payload_with_kind() {
        let record = StoredRecord::encode(&tag("urgent")).unwrap();
        assert_eq!(record.kind(), "tag");
        assert_eq!(record.payload()["label"], "urgent");
        assert!(record.is_kind::<Tag>());
        assert!(!record.is_kind::<Label>());
    }

    #[test]
    fn decode_stamps_record_key_as_identity() {
        let record = StoredRecord::encode(&tag("urgent")).unwrap();
        let id = EntityId::generate();
        let decoded: Tag = record.decode(id).unwrap();
        assert_eq!(decoded.label, "urgent");
        assert_eq!(decoded.id(), Some(id));
    }

    #[test]
    fn decode_as_wrong_kind_is_type_mismatch() {
        let record = StoredRecord::encode(&tag("urgent")).unwrap();
        let err = record.decode::<Label>(EntityId::generate()).unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::type_mismatch("label", "tag"))
        );
    }

    #[test]
    fn records_keep_one_entry_per_id() {
        let mut records = Records::new();
        let id = EntityId::generate();
        records.insert(id, StoredRecord::encode(&tag("a")).unwrap());
        records.insert(id, StoredRecord::encode(&tag("b")).unwrap());
        assert_eq!(records.len(), 1);
        assert!(records.contains(id));
        assert_eq!(records.get(id).unwrap().payload()["label"], "b");

        assert!(records.remove(id).is_some());
        assert!(!records.contains(id));
        assert!(records.remove(id).is_none());
        assert!(records.is_empty());
    }

    #[test]
    fn count_kind_only_counts_matching_tags() {
        let mut records = Records::new();
        records.insert(EntityId::generate(), StoredRecord::encode(&tag("a")).unwrap());
        records.insert(EntityId::generate(), StoredRecord::encode(&tag("b")).unwrap());
        records.insert(
            EntityId::generate(),
            StoredRecord::encode(&Label::default()).unwrap(),
        );
        assert_eq!(records.count_kind::<Tag>(), 2);
        assert_eq!(records.count_kind::<Label>(), 1);
    }
}
