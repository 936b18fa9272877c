//! Local HTTP server - turns plain HTTP requests into HTTP API (payload v2)
//! events so the handler can be exercised without a gateway in front of it.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use base64::Engine;
use lambda_echo_sdk::Response as Envelope;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handler::process_event;

/// Shared server state
pub struct ServerState {
    pub max_body_bytes: usize,
}

/// Create the router that forwards every method and path to the handler
pub fn create_router(config: &AppConfig) -> Router {
    let state = Arc::new(ServerState {
        max_body_bytes: config.max_body_bytes,
    });

    Router::new()
        .route("/", any(handle_http_request))
        .route("/{*path}", any(handle_http_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, create_router(config)).await?;
    Ok(())
}

async fn handle_http_request(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let event = match build_event(request, state.max_body_bytes).await {
        Ok(event) => event,
        Err(response) => return response,
    };

    into_http_response(process_event(&event))
}

/// Translate an HTTP request into a payload v2 event
async fn build_event(request: Request<Body>, max_body_bytes: usize) -> Result<Value, Response> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();

    let raw_query = request.uri().query().unwrap_or_default().to_string();
    let query: HashMap<String, String> =
        url::form_urlencoded::parse(raw_query.as_bytes()).into_owned().collect();

    let headers: HashMap<String, String> = request.headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body_bytes = match axum::body::to_bytes(request.into_body(), max_body_bytes).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(request_id = %request_id, "Failed to read body: {}", e);
            return Err((StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response());
        }
    };

    let (body, is_base64_encoded) = if body_bytes.is_empty() {
        (Value::Null, false)
    } else {
        match std::str::from_utf8(&body_bytes) {
            Ok(text) => (Value::String(text.to_string()), false),
            Err(_) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(&body_bytes);
                (Value::String(encoded), true)
            }
        }
    };

    // Gateways send null rather than an empty map
    let query_parameters = if query.is_empty() { Value::Null } else { json!(query) };

    Ok(json!({
        "version": "2.0",
        "rawPath": path,
        "rawQueryString": raw_query,
        "queryStringParameters": query_parameters,
        "headers": headers,
        "requestContext": {
            "requestId": request_id,
            "http": {
                "method": method,
                "path": path,
            },
        },
        "body": body,
        "isBase64Encoded": is_base64_encoded,
    }))
}

/// Convert a handler envelope into an HTTP response
fn into_http_response(envelope: Envelope) -> Response {
    let status = match StatusCode::from_u16(envelope.status_code) {
        Ok(status) => status,
        Err(_) => {
            tracing::warn!("Handler returned invalid status code {}", envelope.status_code);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut builder = Response::builder().status(status);

    for (key, value) in &envelope.headers {
        builder = builder.header(key, value);
    }

    match builder.body(Body::from(envelope.body)) {
        Ok(response) => response,
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}
