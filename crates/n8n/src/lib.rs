//! REST client for the remote workflow API.
//!
//! [`api::N8nApi`] wraps the HTTP endpoints used to read and update
//! workflows. Callers depend on the [`api::WorkflowApi`] trait so the
//! transport can be swapped out in tests.

pub mod api;
pub mod config;

pub use api::{N8nApi, N8nApiError, WorkflowApi};
pub use config::{ConfigError, N8nConfig};
