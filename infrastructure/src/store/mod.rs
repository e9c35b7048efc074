//! User-data store adapters

pub mod memory;

pub use memory::InMemoryUserData;
