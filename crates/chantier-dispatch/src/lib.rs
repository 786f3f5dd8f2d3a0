//! Chantier Dispatch - Request orchestration
//!
//! This crate runs the worksite use cases against an injected store,
//! serializing writes per collection and emitting notifications.

pub mod dispatcher;
pub mod models;

pub use dispatcher::Dispatcher;
pub use models::{AssignOutcome, DispatchSettings, ReportOutcome, StoreStatus};
