//! Response envelope returned to the invoking gateway

use crate::HandlerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content type used for every response body this crate produces.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Methods advertised through `Access-Control-Allow-Methods`.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Headers advertised through `Access-Control-Allow-Headers`.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Represents an outgoing response in API Gateway proxy form.
///
/// Serializes as `{"statusCode": .., "headers": {..}, "body": ".."}`, where
/// `body` is itself a JSON document encoded as a string.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | Successful response |
/// | `json(status, body)` | any | Custom status with JSON body |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Serialized JSON body
    #[serde(default)]
    pub body: String,
}

impl Response {
    /// Create a 200 OK response with JSON body.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"message": "Success"}))
    /// ```
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, body)
    }

    /// Create a JSON response with a custom status code.
    ///
    /// Only `Content-Type` is set; add CORS with [`Response::with_cors`].
    /// A body that fails to serialize becomes a 500 carrying the
    /// serialization error.
    pub fn json<T: Serialize>(status_code: u16, body: T) -> Self {
        match serde_json::to_string(&body) {
            Ok(body) => Self::json_text(status_code, body),
            Err(err) => {
                let message = HandlerError::SerializationError(err).to_string();
                let body = serde_json::json!({"error": message}).to_string();
                Self::json_text(500, body)
            }
        }
    }

    fn json_text(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add CORS headers for cross-origin requests.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(data).with_cors("*")
    /// ```
    pub fn with_cors(self, origin: impl Into<String>) -> Self {
        self.with_header("Access-Control-Allow-Origin", origin)
            .with_header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS)
            .with_header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Parse the body back into a JSON value.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
