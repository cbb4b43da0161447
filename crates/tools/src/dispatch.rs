use std::sync::Arc;

use flowbridge_n8n::WorkflowApi;
use serde_json::Value;

use crate::definitions::{tool_definitions, ToolDefinition, GET_WORKFLOW, UPDATE_WORKFLOW};
use crate::error::ToolError;
use crate::result::{ToolOutput, ToolResult};
use crate::{get_workflow, update_workflow};

/// Routes tool calls by name to their handlers.
///
/// Holds the remote API collaborator shared by every tool. Cheap to clone.
#[derive(Clone)]
pub struct ToolDispatcher {
    api: Arc<dyn WorkflowApi>,
}

impl ToolDispatcher {
    pub fn new(api: Arc<dyn WorkflowApi>) -> Self {
        Self { api }
    }

    /// Definitions of every tool this dispatcher handles.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Run a tool and return its raw outcome.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<ToolOutput, ToolError> {
        let api = self.api.as_ref();
        match name {
            UPDATE_WORKFLOW => update_workflow::handle(api, args).await,
            GET_WORKFLOW => get_workflow::handle(api, args).await,
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }

    /// Run a tool and fold the outcome into a structured result.
    pub async fn call(&self, name: &str, args: Value) -> ToolResult {
        match self.dispatch(name, args).await {
            Ok(output) => output.into(),
            Err(err) => {
                tracing::warn!(tool = name, code = err.code(), error = %err, "Tool call failed");
                err.into()
            }
        }
    }
}
