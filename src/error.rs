use thiserror::Error;
pub use url::ParseError as UrlParseError;

/// Error types for the listings API client.
#[derive(Error, Debug)]
pub enum ListingsError {
    /// The server answered with a GraphQL error list. Only the first message
    /// is kept.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response envelope carried neither data nor errors.
    #[error("No data returned from API")]
    MissingData,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error parsing URL.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] UrlParseError),

    /// The API endpoint/path string is invalid.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

/// Result type for listings API operations.
pub type ListingsResult<T> = Result<T, ListingsError>;
