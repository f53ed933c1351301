use thiserror::Error;

/// Shown whenever nothing more specific can be said about a failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Oops! Something went wrong. Please try again or contact us if the problem persists.";

/// Shown after the server rejects an expired or invalid token.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired.";

/// Client-side error taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The server flagged the credential as expired or invalid.
    #[error("session expired")]
    SessionExpired,

    /// A body could not be decoded as the expected JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// Browser storage (localStorage or cookies) failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Text the alert surface shows for this error
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
