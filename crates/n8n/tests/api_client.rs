//! Integration tests for [`N8nApi`] against a mock HTTP server.
//!
//! Each test uses its own workflow id so the shared mock server never
//! matches a request against another test's mock.

use assert_matches::assert_matches;
use flowbridge_core::workflow::WorkflowUpdatePayload;
use flowbridge_n8n::api::API_KEY_HEADER;
use flowbridge_n8n::{N8nApi, N8nApiError, WorkflowApi};
use mockito::{mock, Matcher};
use serde_json::json;

const API_KEY: &str = "test-key";

fn api() -> N8nApi {
    N8nApi::new(&mockito::server_url(), API_KEY).expect("mock server url should parse")
}

// ---------------------------------------------------------------------------
// Test: get_workflow decodes the stored workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_workflow_sends_api_key_and_decodes_body() {
    let body = json!({
        "id": "wf-get",
        "name": "Nightly sync",
        "active": true,
        "nodes": [{ "name": "Cron" }],
        "connections": {},
        "updatedAt": "2024-05-01T12:00:00.000Z",
    });
    let get_mock = mock("GET", "/api/v1/workflows/wf-get")
        .match_header(API_KEY_HEADER, API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create();

    let workflow = api().get_workflow("wf-get").await.unwrap();

    get_mock.assert();
    assert_eq!(workflow.id.as_deref(), Some("wf-get"));
    assert_eq!(workflow.name.as_deref(), Some("Nightly sync"));
    assert!(workflow.active);
    assert_eq!(workflow.node_count(), 1);
    assert!(workflow.updated_at.is_some());
}

// ---------------------------------------------------------------------------
// Test: non-2xx responses surface status and message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_workflow_not_found_surfaces_api_error() {
    let get_mock = mock("GET", "/api/v1/workflows/wf-missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Not Found"}"#)
        .create();

    let err = api().get_workflow("wf-missing").await.unwrap_err();

    get_mock.assert();
    assert_eq!(err.status(), Some(404));
    assert_matches!(err, N8nApiError::Api { status: 404, message } if message == "Not Found");
}

#[tokio::test]
async fn get_workflow_with_undecodable_body_is_invalid_response() {
    let get_mock = mock("GET", "/api/v1/workflows/wf-garbled")
        .with_status(200)
        .with_body("<html>proxy login</html>")
        .create();

    let err = api().get_workflow("wf-garbled").await.unwrap_err();

    get_mock.assert();
    assert_matches!(err, N8nApiError::InvalidResponse(_));
}

// ---------------------------------------------------------------------------
// Test: update_workflow sends only the populated payload fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_workflow_puts_payload_and_returns_stored_workflow() {
    let put_mock = mock("PUT", "/api/v1/workflows/wf-put")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_body(Matcher::Json(json!({
            "name": "Renamed",
            "nodes": [],
            "staticData": { "cursor": 3 },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "wf-put", "name": "Renamed", "active": false }).to_string())
        .create();

    let payload = WorkflowUpdatePayload {
        name: Some("Renamed".into()),
        nodes: Some(vec![]),
        static_data: Some(json!({ "cursor": 3 })),
        ..Default::default()
    };
    let workflow = api().update_workflow("wf-put", &payload).await.unwrap();

    put_mock.assert();
    assert_eq!(workflow.name.as_deref(), Some("Renamed"));
    assert!(!workflow.active);
}

#[tokio::test]
async fn update_workflow_rejection_keeps_raw_body_without_message() {
    let put_mock = mock("PUT", "/api/v1/workflows/wf-reject")
        .with_status(400)
        .with_body("request/body must have required property 'name'")
        .create();

    let err = api()
        .update_workflow("wf-reject", &WorkflowUpdatePayload::default())
        .await
        .unwrap_err();

    put_mock.assert();
    assert_matches!(
        err,
        N8nApiError::Api { status: 400, message }
            if message == "request/body must have required property 'name'"
    );
}
