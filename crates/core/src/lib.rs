//! `recordkeep-core` — entity building blocks.
//!
//! This crate contains the **pure** part of the persistence layer: identifiers,
//! the entity contract, and the error taxonomy. No IO happens here.

pub mod entity;
pub mod error;
pub mod id;
pub mod lookup;

pub use entity::{CopyValues, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, Identity};
pub use lookup::LookupKey;
