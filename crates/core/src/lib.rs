//! Domain-independent primitives shared by the db and api crates.

pub mod error;
pub mod roles;
pub mod types;
