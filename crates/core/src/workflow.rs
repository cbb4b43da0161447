//! Workflow documents, partial updates, and change summaries.
//!
//! An update is merged field-by-field onto the stored workflow: a supplied
//! field replaces the stored one, an absent field keeps the stored value, and
//! a field that is neither supplied nor stored is left out of the payload.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::{Timestamp, WorkflowId};

// ---------------------------------------------------------------------------
// Argument keys (as sent by tool callers)
// ---------------------------------------------------------------------------

/// Required identifier argument.
pub const ARG_WORKFLOW_ID: &str = "workflowId";

pub const ARG_NAME: &str = "name";
pub const ARG_NODES: &str = "nodes";
pub const ARG_CONNECTIONS: &str = "connections";
pub const ARG_SETTINGS: &str = "settings";
pub const ARG_STATIC_DATA: &str = "staticData";

/// Summary text when the caller supplied nothing that would change.
pub const NO_CHANGES_MESSAGE: &str = "No changes were made";

/// Rendering of a stored name that was never set.
const UNSET_NAME: &str = "(unset)";

/// Shown in place of a workflow name the remote did not return.
pub const UNNAMED_WORKFLOW: &str = "(unnamed)";

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// A workflow as returned by the remote API.
///
/// Only the fields this crate reasons about are typed. Everything else the
/// remote returns is kept in [`extra`](Self::extra) so callers can inspect it,
/// but it is never sent back on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Remote identifier. Older servers return numeric ids; both forms are
    /// accepted and normalised to a string.
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<WorkflowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the workflow is currently active (triggers armed). A missing
    /// or `null` flag reads as inactive.
    #[serde(default, deserialize_with = "deserialize_null_as_false")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    /// Unparseable timestamps read as `None`; they are never sent back.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
    /// Remote fields not modelled above (tags, versionId, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workflow {
    /// Number of nodes in the stored graph (zero when absent).
    pub fn node_count(&self) -> usize {
        self.nodes.as_ref().map_or(0, Vec::len)
    }
}

/// A caller-supplied partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowUpdate {
    pub name: Option<String>,
    pub nodes: Option<Vec<Value>>,
    pub connections: Option<Map<String, Value>>,
    pub settings: Option<Value>,
    pub static_data: Option<Value>,
}

/// Validated arguments of an update call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkflowArgs {
    pub workflow_id: WorkflowId,
    pub update: WorkflowUpdate,
}

/// Body sent to the remote update endpoint.
///
/// Fields that are `None` are omitted entirely rather than sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
}

impl WorkflowUpdatePayload {
    /// Names of the fields that will be sent, in wire spelling.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.name.is_some() {
            names.push(ARG_NAME);
        }
        if self.nodes.is_some() {
            names.push(ARG_NODES);
        }
        if self.connections.is_some() {
            names.push(ARG_CONNECTIONS);
        }
        if self.settings.is_some() {
            names.push(ARG_SETTINGS);
        }
        if self.static_data.is_some() {
            names.push(ARG_STATIC_DATA);
        }
        names
    }
}

/// Human-readable list of what an update changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    changes: Vec<String>,
}

impl ChangeSummary {
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            f.write_str(NO_CHANGES_MESSAGE)
        } else {
            write!(f, "Changes: {}", self.changes.join(", "))
        }
    }
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Extract the required `workflowId` argument.
///
/// Absent, `null`, and blank identifiers are all reported as missing.
/// Surrounding whitespace is trimmed. `.` and `..` are rejected because they
/// would address the workflow collection instead of a single workflow.
pub fn require_workflow_id(args: &Value) -> Result<WorkflowId, CoreError> {
    let obj = as_object(args)?;
    match obj.get(ARG_WORKFLOW_ID) {
        None | Some(Value::Null) => Err(CoreError::Validation(format!(
            "{ARG_WORKFLOW_ID} is required"
        ))),
        Some(Value::String(id)) => match id.trim() {
            "" => Err(CoreError::Validation(format!(
                "{ARG_WORKFLOW_ID} is required"
            ))),
            "." | ".." => Err(CoreError::Validation(format!(
                "{ARG_WORKFLOW_ID} must identify a single workflow, got {id:?}"
            ))),
            trimmed => Ok(trimmed.to_string()),
        },
        Some(_) => Err(CoreError::Validation(format!(
            "{ARG_WORKFLOW_ID} must be a string"
        ))),
    }
}

/// Validate raw tool arguments and split them into an identifier and an
/// update.
///
/// Only shape is checked here; nothing is compared against the stored
/// workflow. A `null` field is treated the same as an absent one.
pub fn parse_update_args(args: &Value) -> Result<UpdateWorkflowArgs, CoreError> {
    let workflow_id = require_workflow_id(args)?;
    let obj = as_object(args)?;

    let name = match present(obj, ARG_NAME) {
        None => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            return Err(CoreError::Validation(format!(
                "{ARG_NAME} must be a string"
            )))
        }
    };

    let nodes = match present(obj, ARG_NODES) {
        None => None,
        Some(Value::Array(nodes)) => Some(nodes.clone()),
        Some(_) => {
            return Err(CoreError::Validation(format!(
                "{ARG_NODES} must be an array"
            )))
        }
    };

    let connections = match present(obj, ARG_CONNECTIONS) {
        None => None,
        Some(Value::Object(connections)) => Some(connections.clone()),
        Some(_) => {
            return Err(CoreError::Validation(format!(
                "{ARG_CONNECTIONS} must be an object"
            )))
        }
    };

    Ok(UpdateWorkflowArgs {
        workflow_id,
        update: WorkflowUpdate {
            name,
            nodes,
            connections,
            settings: present(obj, ARG_SETTINGS).cloned(),
            static_data: present(obj, ARG_STATIC_DATA).cloned(),
        },
    })
}

// ---------------------------------------------------------------------------
// Merge and summary
// ---------------------------------------------------------------------------

impl WorkflowUpdate {
    /// True when the caller supplied none of the updatable fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nodes.is_none()
            && self.connections.is_none()
            && self.settings.is_none()
            && self.static_data.is_none()
    }

    /// Build the update payload: supplied value, else stored value, else
    /// omitted.
    pub fn merge_onto(&self, current: &Workflow) -> WorkflowUpdatePayload {
        WorkflowUpdatePayload {
            name: self.name.clone().or_else(|| current.name.clone()),
            nodes: self.nodes.clone().or_else(|| current.nodes.clone()),
            connections: self
                .connections
                .clone()
                .or_else(|| current.connections.clone()),
            settings: self.settings.clone().or_else(|| current.settings.clone()),
            static_data: self
                .static_data
                .clone()
                .or_else(|| current.static_data.clone()),
        }
    }

    /// Describe what this update changes relative to `current`.
    ///
    /// `name` is reported only when it differs from the stored value. The
    /// other fields are reported whenever they were supplied; their contents
    /// are not compared.
    pub fn summarize(&self, current: &Workflow) -> ChangeSummary {
        let mut changes = Vec::new();

        if let Some(new_name) = &self.name {
            if current.name.as_deref() != Some(new_name.as_str()) {
                let old = current
                    .name
                    .as_deref()
                    .map_or_else(|| UNSET_NAME.to_string(), |n| format!("\"{n}\""));
                changes.push(format!("{ARG_NAME}: {old} → \"{new_name}\""));
            }
        }
        if self.nodes.is_some() {
            changes.push(format!("{ARG_NODES} updated"));
        }
        if self.connections.is_some() {
            changes.push(format!("{ARG_CONNECTIONS} updated"));
        }
        if self.settings.is_some() {
            changes.push(format!("{ARG_SETTINGS} updated"));
        }
        if self.static_data.is_some() {
            changes.push(format!("{ARG_STATIC_DATA} updated"));
        }

        ChangeSummary { changes }
    }
}

// ---- private helpers ----

fn as_object(args: &Value) -> Result<&Map<String, Value>, CoreError> {
    args.as_object()
        .ok_or_else(|| CoreError::Validation("Arguments must be a JSON object".to_string()))
}

/// Look up a key, treating an explicit `null` as absent.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn deserialize_null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn deserialize_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<WorkflowId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "workflow id must be a string or number, got {other}"
        ))),
    }
}
