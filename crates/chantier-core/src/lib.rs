//! Chantier Core - Domain models, geo rules and configuration
//!
//! Everything in this crate is synchronous and storage-agnostic: the
//! operations take the current collections and return what should be
//! persisted. Adapters and locking live in the store and dispatch crates.

pub mod assignment;
pub mod config;
pub mod dedup;
pub mod error;
pub mod geo;
pub mod ledger;
pub mod locator;
pub mod models;

pub use error::{ChantierError, Result};
