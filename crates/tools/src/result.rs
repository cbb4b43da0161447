//! Structured tool results.
//!
//! Serialised as either
//! `{"success": true, "data": {...}, "message": "..."}` or
//! `{"success": false, "error": {"code": "...", "message": "...", "status": 404}}`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ToolError;

/// Payload of a successful tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub data: Value,
    /// Human-readable summary of what happened.
    pub message: String,
}

/// Error details of a failed tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Outcome reported back to the dispatch framework.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(ToolOutput),
    Failure(ToolFailure),
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            ToolResult::Success(output) => json!({
                "success": true,
                "data": output.data,
                "message": output.message,
            }),
            ToolResult::Failure(failure) => json!({
                "success": false,
                "error": failure,
            }),
        }
    }
}

impl From<ToolOutput> for ToolResult {
    fn from(output: ToolOutput) -> Self {
        ToolResult::Success(output)
    }
}

impl From<&ToolError> for ToolFailure {
    fn from(err: &ToolError) -> Self {
        ToolFailure {
            code: err.code(),
            message: err.to_string(),
            status: err.status(),
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        ToolResult::Failure(ToolFailure::from(&err))
    }
}
