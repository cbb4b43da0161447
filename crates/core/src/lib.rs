//! Domain types and pure logic for remote workflow updates.
//!
//! Nothing in this crate performs I/O. The REST client lives in
//! `flowbridge-n8n` and the tool surface in `flowbridge-tools`.

pub mod error;
pub mod types;
pub mod workflow;
