use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the `popcast-client` library.
pub enum PopcastClientError {
    /// Transport-level failure (`reqwest`): connection, timeout, body decoding.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 401: the bearer token is missing, invalid or expired.
    #[error("unauthorized")]
    Unauthorized(Option<String>),

    /// The backend answered 403: the token is fine but lacks the privilege.
    #[error("forbidden: {}", .0.as_deref().unwrap_or("no message"))]
    Forbidden(Option<String>),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// Any other non-2xx answer from the backend.
    #[error("backend error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// `error` or `message` field of the response body, if any.
        message: Option<String>,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client-side misuse, e.g. an invalid MIME type on an upload.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of `popcast-client` operations.
pub type PopcastClientResult<T> = Result<T, PopcastClientError>;

impl PopcastClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }

    /// Message the backend attached to a rejected request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::Forbidden(message) | Self::Api { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}
