//! Shared test double for the remote workflow API.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use flowbridge_core::workflow::{Workflow, WorkflowUpdatePayload};
use flowbridge_n8n::{N8nApiError, WorkflowApi};
use serde_json::json;

/// In-memory stand-in for the remote API.
///
/// Serves one stored workflow, records every call, and can be told to fail
/// either the read or the write with an API error.
#[derive(Default)]
pub struct MockWorkflowApi {
    pub stored: Option<Workflow>,
    pub fail_get: Option<(u16, &'static str)>,
    pub fail_update: Option<(u16, &'static str)>,
    pub gets: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, WorkflowUpdatePayload)>>,
}

impl MockWorkflowApi {
    pub fn with_stored(workflow: Workflow) -> Self {
        Self {
            stored: Some(workflow),
            ..Default::default()
        }
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> WorkflowUpdatePayload {
        self.updates
            .lock()
            .unwrap()
            .last()
            .map(|(_, payload)| payload.clone())
            .expect("an update should have been submitted")
    }
}

#[async_trait]
impl WorkflowApi for MockWorkflowApi {
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow, N8nApiError> {
        self.gets.lock().unwrap().push(workflow_id.to_string());
        if let Some((status, message)) = self.fail_get {
            return Err(N8nApiError::Api {
                status,
                message: message.to_string(),
            });
        }
        self.stored.clone().ok_or_else(|| N8nApiError::Api {
            status: 404,
            message: "Not Found".to_string(),
        })
    }

    async fn update_workflow(
        &self,
        workflow_id: &str,
        payload: &WorkflowUpdatePayload,
    ) -> Result<Workflow, N8nApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((workflow_id.to_string(), payload.clone()));
        if let Some((status, message)) = self.fail_update {
            return Err(N8nApiError::Api {
                status,
                message: message.to_string(),
            });
        }
        let stored = self.stored.clone().unwrap_or_default();
        Ok(Workflow {
            id: Some(workflow_id.to_string()),
            name: payload.name.clone(),
            nodes: payload.nodes.clone(),
            connections: payload.connections.clone(),
            settings: payload.settings.clone(),
            static_data: payload.static_data.clone(),
            ..stored
        })
    }
}

/// Stored workflow named "A" with one node and every updatable field set.
pub fn workflow_a() -> Workflow {
    serde_json::from_value(json!({
        "id": "wf-1",
        "name": "A",
        "active": true,
        "nodes": [{
            "name": "Schedule",
            "type": "n8n-nodes-base.scheduleTrigger",
            "position": [0, 0],
            "parameters": {}
        }],
        "connections": {},
        "settings": { "executionOrder": "v1" },
        "staticData": { "lastRun": "2024-01-01" },
    }))
    .expect("fixture should deserialize")
}
