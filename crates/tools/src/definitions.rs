use serde::Serialize;
use serde_json::{json, Value};

pub const UPDATE_WORKFLOW: &str = "update_workflow";
pub const GET_WORKFLOW: &str = "get_workflow";

/// Name, description, and argument schema of a tool, as advertised to the
/// dispatch framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn workflow_id_property() -> Value {
    json!({
        "type": "string",
        "description": "ID of the workflow"
    })
}

fn update_workflow_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "workflowId": workflow_id_property(),
            "name": {
                "type": "string",
                "description": "New name for the workflow"
            },
            "nodes": {
                "type": "array",
                "description": "Complete list of nodes; replaces the stored nodes",
                "items": { "type": "object" }
            },
            "connections": {
                "type": "object",
                "description": "Connections between nodes; replaces the stored connections"
            },
            "settings": {
                "type": "object",
                "description": "Workflow settings"
            },
            "staticData": {
                "type": "object",
                "description": "Static data persisted across executions"
            }
        },
        "required": ["workflowId"]
    })
}

fn get_workflow_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "workflowId": workflow_id_property()
        },
        "required": ["workflowId"]
    })
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: UPDATE_WORKFLOW,
            description: "Update an existing workflow. Omitted fields keep their stored values.",
            input_schema: update_workflow_schema(),
        },
        ToolDefinition {
            name: GET_WORKFLOW,
            description: "Fetch a workflow by ID, including its nodes and connections.",
            input_schema: get_workflow_schema(),
        },
    ]
}
