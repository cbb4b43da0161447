use flowbridge_core::error::CoreError;
use flowbridge_n8n::N8nApiError;

/// Errors a tool call can end with.
///
/// Remote errors are carried unchanged so callers see the remote error kind.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Argument validation or another domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the remote workflow API.
    #[error(transparent)]
    Api(#[from] N8nApiError),

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Stable machine-readable code for the failure result.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            ToolError::Core(CoreError::Internal(_)) => "INTERNAL_ERROR",
            ToolError::Api(N8nApiError::Api { .. }) => "API_ERROR",
            ToolError::Api(N8nApiError::Request(_)) => "REQUEST_ERROR",
            ToolError::Api(N8nApiError::InvalidResponse(_)) => "INVALID_RESPONSE",
            ToolError::Api(N8nApiError::InvalidUrl(_)) => "CONFIG_ERROR",
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
        }
    }

    /// HTTP status reported by the remote API, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Api(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ToolError::Core(CoreError::Validation(_)))
    }
}
