//! Gateway event normalization
//!
//! API Gateway delivers two event shapes depending on the integration:
//!
//! - REST APIs (payload v1) carry `httpMethod` and `path` at the top level.
//! - HTTP APIs (payload v2) carry `rawPath` and nest the verb under
//!   `requestContext.http.method`.
//!
//! Both are read as untyped JSON so a missing or mistyped field degrades to
//! its default instead of failing the invocation.

use crate::request::{Request, ROOT_PATH, UNKNOWN_METHOD};
use base64::Engine;
use serde_json::Value;
use std::collections::HashMap;

/// Which gateway payload format an event looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// `httpMethod` / `path`
    RestApi,
    /// `requestContext.http.method` / `rawPath`
    HttpApi,
    /// Neither method field is present
    Unrecognized,
}

impl EventShape {
    /// Detect the shape from the field that supplies the method.
    pub fn detect(event: &Value) -> Self {
        if string_at(event, "/httpMethod").is_some() {
            EventShape::RestApi
        } else if string_at(event, "/requestContext/http/method").is_some() {
            EventShape::HttpApi
        } else {
            EventShape::Unrecognized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventShape::RestApi => "rest-api",
            EventShape::HttpApi => "http-api",
            EventShape::Unrecognized => "unrecognized",
        }
    }
}

impl Request {
    /// Normalize a gateway event into a request.
    ///
    /// Never fails: absent fields fall back to `UNKNOWN`, `/`, an empty query
    /// map and an empty body.
    ///
    /// # Example
    /// ```ignore
    /// let req = Request::from_event(&json!({"rawPath": "/a", "requestContext": {"http": {"method": "GET"}}}));
    /// assert_eq!(req.method, "GET");
    /// ```
    pub fn from_event(event: &Value) -> Self {
        let method = string_at(event, "/httpMethod")
            .or_else(|| string_at(event, "/requestContext/http/method"))
            .unwrap_or(UNKNOWN_METHOD);

        let path = string_at(event, "/path")
            .or_else(|| string_at(event, "/rawPath"))
            .unwrap_or(ROOT_PATH);

        Request {
            method: method.to_string(),
            path: path.to_string(),
            query: string_map(event.get("queryStringParameters")),
            headers: string_map(event.get("headers")),
            body: extract_body(event),
            request_id: string_at(event, "/requestContext/requestId")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn string_at<'a>(event: &'a Value, pointer: &str) -> Option<&'a str> {
    event.pointer(pointer).and_then(Value::as_str)
}

/// Collect the string-valued entries of a JSON object. Null, non-objects and
/// non-string values are skipped.
fn string_map(value: Option<&Value>) -> HashMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn extract_body(event: &Value) -> String {
    let raw = match event.get("body") {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s,
        // Direct invocations may pass the payload as an object
        Some(other) => return other.to_string(),
    };

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if encoded {
        if let Some(decoded) = decode_base64(raw) {
            return decoded;
        }
    }
    raw.clone()
}

fn decode_base64(raw: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(raw).ok()?;
    String::from_utf8(bytes).ok()
}
