//! Echo handler - dispatches a normalized request on its HTTP method
//!
//! GET echoes path, method and query parameters, POST echoes the parsed JSON
//! body, and every other method gets a generic acknowledgement. Success
//! responses carry the CORS headers; the malformed-body 400 does not.

use lambda_echo_sdk::event::EventShape;
use lambda_echo_sdk::{HandlerError, Request, Response};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Origin advertised on success responses
const CORS_ORIGIN: &str = "*";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetBody<'a> {
    message: &'static str,
    path: &'a str,
    method: &'a str,
    query_parameters: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostBody<'a> {
    message: &'static str,
    received_data: Value,
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct FallbackBody<'a> {
    message: String,
    path: &'a str,
}

/// Entry point shared by every event source.
///
/// Normalizes the event, dispatches it and converts a handler error into its
/// response. Always returns a response.
pub fn process_event(event: &Value) -> Response {
    tracing::info!(event = %event, "Received event");

    let request = Request::from_event(event);
    tracing::debug!(
        request_id = %request.request_id,
        shape = EventShape::detect(event).as_str(),
        method = %request.method,
        path = %request.path,
        user_agent = request.header("User-Agent").map(String::as_str).unwrap_or("-"),
        "Dispatching request"
    );

    let response = match handle(&request) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(request_id = %request.request_id, "Rejecting request: {}", err);
            err.to_response()
        }
    };

    tracing::debug!(
        request_id = %request.request_id,
        status = response.status_code,
        "Request handled"
    );
    response
}

/// Build the response for a normalized request.
pub fn handle(req: &Request) -> Result<Response, HandlerError> {
    let response = match req.method.as_str() {
        "GET" => Response::ok(GetBody {
            message: "Hello from AWS Lambda!",
            path: &req.path,
            method: &req.method,
            query_parameters: &req.query,
        }),
        "POST" => Response::ok(PostBody {
            message: "Data received successfully",
            received_data: req.json_body()?,
            path: &req.path,
        }),
        other => Response::ok(FallbackBody {
            message: format!("Method {} is supported", other),
            path: &req.path,
        }),
    };

    Ok(response.with_cors(CORS_ORIGIN))
}
