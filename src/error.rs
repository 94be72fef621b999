use thiserror::Error;

/// Shown when a transport failure prevents any response
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

/// Failure of a backend call, already classified for the user
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("{}", NETWORK_MESSAGE)]
    Network(#[source] reqwest::Error),

    /// Backend rejected the request with a list of field errors
    #[error("Validation errors: {}", .errors.join(", "))]
    Validation {
        message: Option<String>,
        errors: Vec<String>,
    },

    /// Any other non-success response. `message` may be empty.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 401 from the backend. Stored credentials have already been cleared.
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Unexpected response from server")]
    Decode(#[source] serde_json::Error),

    #[error("Could not build request: {0}")]
    Request(String),
}

impl ApiError {
    /// Text for the user-facing notification, using `fallback` when the
    /// backend gave nothing better to show.
    pub fn notification(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if message.trim().is_empty() => fallback.to_string(),
            ApiError::Decode(_) | ApiError::Request(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
