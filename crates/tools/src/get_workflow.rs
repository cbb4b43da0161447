//! `get_workflow`: read a stored workflow by id.

use flowbridge_core::error::CoreError;
use flowbridge_core::workflow::{require_workflow_id, UNNAMED_WORKFLOW};
use flowbridge_n8n::WorkflowApi;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::result::ToolOutput;

pub async fn handle(api: &dyn WorkflowApi, args: Value) -> Result<ToolOutput, ToolError> {
    let workflow_id = require_workflow_id(&args)?;

    let workflow = api.get_workflow(&workflow_id).await?;
    let document =
        serde_json::to_value(&workflow).map_err(|e| CoreError::Internal(e.to_string()))?;

    let id = workflow.id.clone().unwrap_or(workflow_id);
    let name = workflow.name.as_deref().unwrap_or(UNNAMED_WORKFLOW);
    let message = format!(
        "Workflow \"{name}\" (ID: {id}) has {} node(s) and is {}",
        workflow.node_count(),
        if workflow.active { "active" } else { "inactive" },
    );

    Ok(ToolOutput {
        data: json!({
            "id": id,
            "name": workflow.name,
            "active": workflow.active,
            "nodeCount": workflow.node_count(),
            "workflow": document,
        }),
        message,
    })
}
