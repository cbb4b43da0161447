//! `update_workflow`: merge caller-supplied fields onto the stored workflow.
//!
//! Arguments are validated before any remote call. The stored workflow is
//! then read once and written once; remote failures propagate unchanged.

use flowbridge_core::workflow::{parse_update_args, UpdateWorkflowArgs, UNNAMED_WORKFLOW};
use flowbridge_n8n::WorkflowApi;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::result::ToolOutput;

pub async fn handle(api: &dyn WorkflowApi, args: Value) -> Result<ToolOutput, ToolError> {
    let UpdateWorkflowArgs {
        workflow_id,
        update,
    } = parse_update_args(&args)?;

    let current = api.get_workflow(&workflow_id).await?;

    let payload = update.merge_onto(&current);
    let summary = update.summarize(&current);
    tracing::debug!(
        workflow_id = %workflow_id,
        fields = ?payload.field_names(),
        "Merged workflow update",
    );

    let updated = api.update_workflow(&workflow_id, &payload).await?;

    let id = updated.id.clone().unwrap_or_else(|| workflow_id.clone());
    tracing::info!(
        workflow_id = %id,
        changes = summary.changes().len(),
        "Workflow updated",
    );

    let message = format!(
        "Workflow \"{}\" (ID: {id}) updated successfully. {summary}",
        updated.name.as_deref().unwrap_or(UNNAMED_WORKFLOW),
    );

    Ok(ToolOutput {
        data: json!({
            "id": id,
            "name": updated.name,
            "active": updated.active,
            "changes": summary.changes(),
        }),
        message,
    })
}
