use thiserror::Error;

/// Error types for the listings server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The MongoDB driver reported a failure.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Binding or serving the HTTP listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
