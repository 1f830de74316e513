use thiserror::Error;

/// Failures talking to the chatbot backend.
///
/// Only transport-level problems land here. A reply with `success: false`
/// is a normal response and is handled by the widget.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response was not valid JSON: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request task ended unexpectedly: {0}")]
    TaskFailed(String),
}

/// Failures reading or writing the persistent key/value file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
