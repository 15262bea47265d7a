use serde::{Deserialize, Serialize};

use recordkeep_core::{CopyValues, Entity, Identity};

use crate::address::Address;

/// A customer (person) and their address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    identity: Identity,
    first_name: String,
    last_name: String,
    address: Address,
}

impl Customer {
    /// Create an unsaved customer.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            identity: Identity::unset(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl CopyValues for Customer {
    fn copy_values(&mut self, source: &Self) {
        self.identity = source.identity;
        self.first_name = source.first_name.clone();
        self.last_name = source.last_name.clone();
        self.address = source.address.clone();
    }
}

impl Entity for Customer {
    const KIND: &'static str = "customer";

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.last_name == other.last_name
            && self.first_name == other.first_name
            && self.address == other.address
    }
}

impl Eq for Customer {}
