//! Tool surface for remote workflow operations.
//!
//! Each tool validates its JSON arguments, talks to the remote API through
//! a [`WorkflowApi`](flowbridge_n8n::WorkflowApi) implementation, and
//! reports a structured [`ToolResult`](result::ToolResult).

pub mod definitions;
pub mod dispatch;
pub mod error;
pub mod get_workflow;
pub mod result;
pub mod update_workflow;

pub use dispatch::ToolDispatcher;
pub use error::ToolError;
pub use result::{ToolFailure, ToolOutput, ToolResult};
