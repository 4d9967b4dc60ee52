//! Error types for the MCP server.

use thiserror::Error;

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// JSON-RPC error code for malformed JSON.
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC error code for a structurally invalid request.
pub const INVALID_REQUEST: i32 = -32600;
/// JSON-RPC error code for an unknown method.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC error code for invalid parameters.
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC error code for internal failures.
pub const INTERNAL_ERROR: i32 = -32603;

/// Errors that can occur while serving MCP requests.
#[derive(Debug, Error)]
pub enum McpError {
    /// A required argument was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArg(String),

    /// An argument was supplied but failed validation.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name (dotted for nested fields)
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The URI does not match any resource template.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// The Stay AI API call failed (network error or non-success status).
    #[error("Failed to {operation}: {message}")]
    Remote {
        /// Operation label, e.g. "search properties"
        operation: &'static str,
        /// Normalized message from the response interceptor
        message: String,
    },

    /// Invalid startup configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading from or writing to the transport failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// The JSON-RPC error code used when this error ends a request.
    pub fn code(&self) -> i32 {
        match self {
            McpError::MissingArg(_)
            | McpError::InvalidArg { .. }
            | McpError::UnknownTool(_)
            | McpError::UnknownResource(_) => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        }
    }

    /// Whether this error came from the remote API rather than from the caller.
    pub fn is_remote(&self) -> bool {
        matches!(self, McpError::Remote { .. })
    }
}
