//! Error types for API calls

/// Errors surfaced by the fetch helpers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: the request never produced a response
    #[error("request failed: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server's `error` field when present
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// Stub path taken when not running in a browser
    #[error("not running in a browser")]
    Unsupported,
}
