use serde::{Deserialize, Serialize};

use recordkeep_core::{CopyValues, Entity, Identity};

use crate::address::Address;

/// A company and its registered address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    identity: Identity,
    name: String,
    address: Address,
}

impl Company {
    /// Create an unsaved company.
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            identity: Identity::unset(),
            name: name.into(),
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl CopyValues for Company {
    fn copy_values(&mut self, source: &Self) {
        self.identity = source.identity;
        self.name = source.name.clone();
        self.address = source.address.clone();
    }
}

impl Entity for Company {
    const KIND: &'static str = "company";

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

/// Value equality: identity is ignored (the nested address compares by value too).
impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.address == other.address
    }
}

impl Eq for Company {}
