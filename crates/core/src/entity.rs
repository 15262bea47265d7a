//! Entity traits: identity, copy-values, and the two equality contracts.
//!
//! An entity is a field bag with an [`Identity`] slot. It starts unsaved, gets
//! an identifier on its first save, and goes back to unsaved when deleted.
//!
//! Two equality contracts coexist and are kept separate:
//! - **Identity equality** ([`Entity::identity_eq`]): same identifier, fields ignored.
//!   This is what store lookups rely on.
//! - **Value equality** (`PartialEq` on the concrete type): all domain fields,
//!   identity ignored.

use crate::error::{DomainError, DomainResult};
use crate::id::{EntityId, Identity};

/// Capability: overwrite every field of `self` (identity included) from
/// another instance of the same concrete type.
pub trait CopyValues {
    fn copy_values(&mut self, source: &Self);
}

/// Entity marker + minimal interface.
pub trait Entity: CopyValues {
    /// Type tag written next to every stored value so the store can tell
    /// concrete types apart in a shared collection. Must be unique per type.
    const KIND: &'static str;

    fn identity(&self) -> &Identity;

    fn identity_mut(&mut self) -> &mut Identity;

    /// Assigned identifier, if any.
    fn id(&self) -> Option<EntityId> {
        self.identity().get()
    }

    fn is_unsaved(&self) -> bool {
        self.identity().is_unset()
    }

    /// Identity equality: compares identifiers only, regardless of field contents.
    ///
    /// Two unsaved instances compare equal (both carry the unset identity).
    fn identity_eq(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.identity() == other.identity()
    }

    /// Construct a new instance from an existing one, identity included.
    fn copied_from(source: &Self) -> Self
    where
        Self: Sized + Default,
    {
        let mut copy = Self::default();
        copy.copy_values(source);
        copy
    }

    /// Like [`Entity::copied_from`], but for a source that may be absent.
    fn try_copied_from(source: Option<&Self>) -> DomainResult<Self>
    where
        Self: Sized + Default,
    {
        source
            .map(Self::copied_from)
            .ok_or_else(|| DomainError::invalid_argument(format!("{}: source is absent", Self::KIND)))
    }
}
