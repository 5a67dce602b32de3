//! Error types for MCP server operations.

use cip_sdk::SdkError;
use thiserror::Error;

/// MCP server error types
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid request format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Tool arguments do not match the tool's input schema
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Method or tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Startup failure (settings, profile loading, detector client)
    #[error("Startup error: {0}")]
    Startup(#[from] SdkError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl McpError {
    /// Convert to JSON-RPC error code
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::InvalidRequest(_) => -32600,
            McpError::InvalidParams(_) => -32602,
            McpError::ToolNotFound(_) => -32601,
            McpError::Startup(_) => -32000,
            McpError::JsonError(_) => -32700,
            McpError::IoError(_) => -32000,
        }
    }
}
