//! Parties domain module (addresses, companies, customers).
//!
//! Plain field bags built on the `recordkeep-core` entity contract. They
//! compare by value and know nothing about storage; persistence comes from the
//! store crate's `Persist` extension trait.

pub mod address;
pub mod company;
pub mod customer;

pub use address::Address;
pub use company::Company;
pub use customer::Customer;
