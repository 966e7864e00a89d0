use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlugscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, PlugscopeError>;

/// Error type for collaborator and entry-level failures that are wrapped
/// into a checked problem at the resolver boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
