//! Response builders for API Gateway proxy responses.
//!
//! Every response allows any origin, method and header. Credentials are
//! not allowed, since browsers reject them alongside a wildcard origin.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::errors::SummarizerError;

const SERIALIZE_FAILED: &str = "failed to serialize response";

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "*",
        "Access-Control-Allow-Headers": "*"
    })
}

/// Returns a response with `status_code` and `body` serialized as JSON.
///
/// A body that fails to serialize becomes a 500 with a `detail` reason.
#[must_use]
pub fn json_response<B: Serialize>(status_code: u16, body: &B) -> Value {
    let (status_code, body) = match serde_json::to_string(body) {
        Ok(body) => (status_code, body),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            (500, json!({ "detail": SERIALIZE_FAILED }).to_string())
        }
    };
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body
    })
}

/// Returns an error response with the given status code and reason.
#[must_use]
pub fn err_response(status_code: u16, detail: &str) -> Value {
    json_response(status_code, &json!({ "detail": detail }))
}

#[must_use]
pub fn error_from(error: &SummarizerError) -> Value {
    err_response(error.status_code(), &error.to_string())
}

/// Returns a 204 answer to a CORS preflight request.
#[must_use]
pub fn preflight() -> Value {
    json!({
        "statusCode": 204,
        "headers": cors_headers(),
        "body": ""
    })
}
