//! A2A error types.

use thiserror::Error;

/// Errors that can occur when speaking the A2A protocol.
#[derive(Debug, Error)]
pub enum A2AError {
    /// Failed to discover the agent card at the well-known endpoint.
    #[error("agent discovery failed: {0}")]
    DiscoveryFailed(String),

    /// The agent card is invalid or missing required fields.
    #[error("invalid agent card: {0}")]
    InvalidAgentCard(String),

    /// HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote agent returned a JSON-RPC error.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// The remote agent replied without any usable content.
    #[error("empty reply from agent: {0}")]
    EmptyReply(String),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A2A Result type alias.
pub type A2AResult<T> = Result<T, A2AError>;
