use serde::{Deserialize, Serialize};

use recordkeep_core::{CopyValues, Entity, Identity};

/// Postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    identity: Identity,
    street: String,
    city: String,
    state: String,
    zip: String,
}

impl Address {
    /// Create an unsaved address.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            identity: Identity::unset(),
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }
}

impl CopyValues for Address {
    fn copy_values(&mut self, source: &Self) {
        self.identity = source.identity;
        self.street = source.street.clone();
        self.city = source.city.clone();
        self.state = source.state.clone();
        self.zip = source.zip.clone();
    }
}

impl Entity for Address {
    const KIND: &'static str = "address";

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

/// Value equality: identity is ignored.
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.street == other.street
            && self.city == other.city
            && self.state == other.state
            && self.zip == other.zip
    }
}

impl Eq for Address {}

#[cfg(test)]
mod tests {
    use super::*;
    use recordkeep_core::EntityId;

    fn sample() -> Address {
        Address::new("56 Main St", "Mesa", "AZ", "34454")
    }

    #[test]
    fn new_address_is_unsaved() {
        let address = sample();
        assert!(address.is_unsaved());
        assert_eq!(address.identity().to_string(), "");
        assert_eq!(address.street(), "56 Main St");
        assert_eq!(address.zip(), "34454");
    }

    #[test]
    fn equal_fields_are_equal_regardless_of_identity() {
        let a = sample();
        let mut b = sample();
        b.identity_mut().assign(EntityId::generate());
        assert_eq!(a, b);
        assert!(!a.identity_eq(&b));
    }

    #[test]
    fn any_field_difference_breaks_equality() {
        assert_ne!(sample(), Address::new("56 Main St", "Mesa", "AZ", "34455"));
        assert_ne!(sample(), Address::new("57 Main St", "Mesa", "AZ", "34454"));
    }

    #[test]
    fn copied_from_keeps_identity() {
        let mut source = sample();
        let id = EntityId::generate();
        source.identity_mut().assign(id);

        let copy = Address::copied_from(&source);
        assert_eq!(copy, source);
        assert_eq!(copy.id(), Some(id));
    }
}
