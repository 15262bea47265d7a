//! Whole-collection record store boundary.
//!
//! A record store loads every record at once and replaces every record at
//! once. There is no partial read or delta write; callers load, mutate in
//! memory, and save the full collection back.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileStore;
pub use in_memory::InMemoryStore;
pub use r#trait::RecordStore;
