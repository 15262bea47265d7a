//! Entity identifiers and the optional identity slot every entity carries.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Primary key of a persisted entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The nil UUID is reserved as the "never assigned" value.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<EntityId> for Uuid {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_argument(format!("EntityId `{s}`: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Identity slot of an entity: either unset (never saved, or deleted) or an
/// assigned [`EntityId`].
///
/// The external string form is empty while unset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<EntityId>", into = "Option<EntityId>")]
pub struct Identity(Option<EntityId>);

impl Identity {
    pub const fn unset() -> Self {
        Self(None)
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<EntityId> {
        self.0
    }

    pub fn assign(&mut self, id: EntityId) {
        *self = Self::from(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Parse the external string form. Empty input means unset.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Ok(Self::unset());
        }
        s.parse::<EntityId>().map(Self::from)
    }
}

impl From<EntityId> for Identity {
    fn from(id: EntityId) -> Self {
        if id.is_nil() { Self(None) } else { Self(Some(id)) }
    }
}

impl From<Option<EntityId>> for Identity {
    fn from(id: Option<EntityId>) -> Self {
        id.map(Self::from).unwrap_or_default()
    }
}

impl From<Identity> for Option<EntityId> {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(id) => core::fmt::Display::fmt(&id, f),
            None => Ok(()),
        }
    }
}
