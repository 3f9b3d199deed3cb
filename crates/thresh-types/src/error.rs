use thiserror::Error;

/// Errors from the generation service transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("generation request failed: {0}")]
    GenerationFailed(String),

    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("feedback submission failed: {0}")]
    FeedbackFailed(String),
}

/// Errors from the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard failed: {0}")]
    Failed(String),
}

/// Errors from message store mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("message not found")]
    NotFound,

    #[error("message '{0}' is not generated code")]
    NotGenerated(String),
}

/// Errors from loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
