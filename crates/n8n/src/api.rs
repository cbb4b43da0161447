//! REST API client for the workflow endpoints.
//!
//! Wraps `GET /api/v1/workflows/{id}` and `PUT /api/v1/workflows/{id}`
//! using [`reqwest`]. Failures are returned as-is; nothing is retried.

use async_trait::async_trait;
use flowbridge_core::workflow::{Workflow, WorkflowUpdatePayload};
use reqwest::Url;

use crate::config::N8nConfig;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Path segments of the workflow collection below the base URL.
const WORKFLOWS_PATH: [&str; 3] = ["api", "v1", "workflows"];

/// Remote operations the workflow tools depend on.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Fetch the stored workflow.
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow, N8nApiError>;

    /// Replace the updatable fields of a workflow and return the stored
    /// result.
    async fn update_workflow(
        &self,
        workflow_id: &str,
        payload: &WorkflowUpdatePayload,
    ) -> Result<Workflow, N8nApiError>;
}

/// HTTP client for a single workflow API instance.
pub struct N8nApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum N8nApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, or the raw body.
        message: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The base URL or workflow id cannot address a single workflow resource.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl N8nApiError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }
}

impl N8nApi {
    /// Create a client with a default [`reqwest::Client`].
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:5678`.
    /// * `api_key` - Sent in the [`API_KEY_HEADER`] header.
    pub fn new(api_url: &str, api_key: impl Into<String>) -> Result<Self, N8nApiError> {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, N8nApiError> {
        let base_url = Url::parse(api_url)
            .map_err(|e| N8nApiError::InvalidUrl(format!("{api_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(N8nApiError::InvalidUrl(api_url.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build a client from configuration, applying the request timeout.
    pub fn from_config(config: &N8nConfig) -> Result<Self, N8nApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(client, &config.api_url, config.api_key.clone())
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// URL of a single workflow resource. The id is percent-encoded as one
    /// path segment. `.` and `..` are refused since URL normalisation would
    /// drop them and address the collection instead.
    pub fn workflow_url(&self, workflow_id: &str) -> Result<Url, N8nApiError> {
        if matches!(workflow_id, "" | "." | "..") {
            return Err(N8nApiError::InvalidUrl(format!(
                "workflow id {workflow_id:?} does not name a single workflow"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| N8nApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(WORKFLOWS_PATH)
            .push(workflow_id);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the
    /// `message` of a JSON error body is preferred over the raw text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, N8nApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(N8nApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into a [`Workflow`].
    async fn parse_workflow(response: reqwest::Response) -> Result<Workflow, N8nApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| N8nApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WorkflowApi for N8nApi {
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow, N8nApiError> {
        tracing::debug!(workflow_id, "Fetching workflow");

        let response = self
            .client
            .get(self.workflow_url(workflow_id)?)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        Self::parse_workflow(response).await
    }

    async fn update_workflow(
        &self,
        workflow_id: &str,
        payload: &WorkflowUpdatePayload,
    ) -> Result<Workflow, N8nApiError> {
        tracing::debug!(
            workflow_id,
            fields = ?payload.field_names(),
            "Submitting workflow update",
        );

        let response = self
            .client
            .put(self.workflow_url(workflow_id)?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        Self::parse_workflow(response).await
    }
}

/// Extract a human-readable message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
