//! Chantier Store - Storage port and adapters
//!
//! This crate defines the collection storage port, typed access to the four
//! collections, and the in-memory and JSON-file adapters.

pub mod auth;
pub mod collections;
pub mod json;
pub mod memory;
pub mod ports;

pub use auth::{hash_password, Authenticator};
pub use collections::Collections;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use ports::{Collection, CollectionStore};
