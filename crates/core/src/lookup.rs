//! Arguments accepted by a find-by-identifier lookup.

use crate::error::DomainResult;
use crate::id::{EntityId, Identity};

/// Something that names (or fails to name) a stored entity.
///
/// `Ok(None)` means "nothing to look up": an empty or missing string, or an
/// unset identity. Lookups treat that as not-found, never as an error.
/// A non-empty string that does not parse is an invalid argument.
pub trait LookupKey {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>>;
}

impl LookupKey for EntityId {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        Ok(Identity::from(self).get())
    }
}

impl LookupKey for Identity {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        Ok(self.get())
    }
}

impl LookupKey for &Identity {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        Ok(self.get())
    }
}

impl LookupKey for &str {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        Identity::parse(self).map(|identity| identity.get())
    }
}

impl LookupKey for &String {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        self.as_str().into_entity_id()
    }
}

impl LookupKey for String {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        self.as_str().into_entity_id()
    }
}

impl<K: LookupKey> LookupKey for Option<K> {
    fn into_entity_id(self) -> DomainResult<Option<EntityId>> {
        match self {
            Some(key) => key.into_entity_id(),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    #[test]
    fn empty_and_missing_strings_look_up_nothing() {
        assert_eq!("".into_entity_id().unwrap(), None);
        assert_eq!(None::<&str>.into_entity_id().unwrap(), None);
        assert_eq!(String::new().into_entity_id().unwrap(), None);
    }

    #[test]
    fn malformed_string_is_invalid_argument() {
        let err = "definitely-not-an-id".into_entity_id().unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn canonical_string_resolves_to_the_same_id() {
        let id = EntityId::generate();
        assert_eq!(id.to_string().into_entity_id().unwrap(), Some(id));
        assert_eq!(Some(id.to_string().as_str()).into_entity_id().unwrap(), Some(id));
        assert_eq!(id.into_entity_id().unwrap(), Some(id));
    }

    #[test]
    fn unset_identity_looks_up_nothing() {
        assert_eq!(Identity::unset().into_entity_id().unwrap(), None);
    }
}
