//! Error types for the notification dispatcher

/// Errors that can occur in the notification dispatcher
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dispatcher operations
pub type Result<T> = std::result::Result<T, DispatchError>;
