//! Error types for the Foundry control-plane and chat clients.

use thiserror::Error;

/// Errors that can occur when talking to the Foundry control plane or the
/// Azure OpenAI chat endpoint.
#[derive(Debug, Error)]
pub enum FoundryError {
    /// The remote service answered with a non-success HTTP status.
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Ambient credential resolution failed.
    #[error("credential error: {0}")]
    Credential(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// The service reply was missing the content we expected.
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

impl FoundryError {
    /// Whether this error is a remote "not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FoundryError::Status { status: 404, .. })
    }
}

/// Result type alias for Foundry operations.
pub type FoundryResult<T> = Result<T, FoundryError>;
