//! AWS Lambda runtime integration

use lambda_echo_sdk::Response;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use crate::handler::process_event;

/// Register with the Lambda runtime API and serve invocations until the
/// runtime shuts the process down.
pub async fn run() -> Result<(), Error> {
    lambda_runtime::run(service_fn(function_handler)).await
}

async fn function_handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let (payload, context) = event.into_parts();
    tracing::debug!(aws_request_id = %context.request_id, "Invocation received");

    Ok(process_event(&payload))
}
