//! Error types for lambda-echo handlers

use thiserror::Error;

/// Errors that can occur while handling an event
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("IPC error: {0}")]
    IpcError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::InvalidJson(_) | HandlerError::MalformedEvent(_) => 400,
            _ => 500,
        }
    }

    /// Convert to a Response.
    ///
    /// Error responses only carry `Content-Type`; CORS headers are added by
    /// the handler on its success paths.
    pub fn to_response(&self) -> crate::Response {
        crate::Response::json(
            self.status_code(),
            serde_json::json!({
                "error": self.to_string()
            }),
        )
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.to_response()
    }
}
