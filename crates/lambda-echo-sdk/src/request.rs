//! Normalized request representation for handlers

use crate::error::HandlerError;
use serde_json::Value;
use std::collections::HashMap;

/// Method reported when the event names none.
pub const UNKNOWN_METHOD: &str = "UNKNOWN";

/// Path reported when the event names none.
pub const ROOT_PATH: &str = "/";

/// Represents an incoming request after normalization.
///
/// Built from a gateway event with [`Request::from_event`]; every field has a
/// default so normalization never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method as sent by the gateway (GET, POST, ...)
    pub method: String,

    /// Request path (e.g., "/items/123")
    pub path: String,

    /// Query parameters
    pub query: HashMap<String, String>,

    /// HTTP headers
    pub headers: HashMap<String, String>,

    /// Request body, already base64-decoded when the gateway encoded it
    pub body: String,

    /// Gateway request ID for tracing
    pub request_id: String,
}

impl Request {
    /// Parse the body as JSON, treating an empty body as `{}`.
    ///
    /// # Example
    /// ```ignore
    /// let data = req.json_body()?; // HandlerError::InvalidJson on bad input
    /// ```
    pub fn json_body(&self) -> Result<Value, HandlerError> {
        if self.body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.body).map_err(HandlerError::InvalidJson)
    }

    /// Get a header value (case-insensitive lookup).
    ///
    /// # Example
    /// ```ignore
    /// let content_type = req.header("content-type");
    /// ```
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: UNKNOWN_METHOD.to_string(),
            path: ROOT_PATH.to_string(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: String::new(),
            request_id: String::new(),
        }
    }
}
