//! Errors surfaced by the API client.

/// Failure of a backend call, displayed verbatim in the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network Error")]
    Network,
    /// Non-2xx response. `message` is the body's `error` field or `"Error"`.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// A 2xx payload that does not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Transport-level failure (DNS, connection refused, CORS, aborted fetch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);
