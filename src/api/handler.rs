//! API Lambda handler - thin router in front of the summarizer.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::core::summarize::Summarizer;
use crate::errors::SummarizerError;
use crate::model::{Generator, TextTokenizer};

pub const HEALTH_MESSAGE: &str = "Email Summarization Model API is running.";

/// Lambda entry point. Routing failures become error responses; the
/// function itself only fails if the runtime hands over a broken event.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler<T, G>(
    summarizer: &Summarizer<T, G>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    T: TextTokenizer + ?Sized,
    G: Generator + ?Sized,
{
    Ok(route(summarizer, &event.payload).await)
}

/// Dispatches an API Gateway proxy payload to the matching route.
pub async fn route<T, G>(summarizer: &Summarizer<T, G>, payload: &Value) -> Value
where
    T: TextTokenizer + ?Sized,
    G: Generator + ?Sized,
{
    let method = parsing::request_method(payload);
    let path = parsing::request_path(payload);
    info!(method = %method, raw_path = %path, "Request received");

    if method == "OPTIONS" {
        return helpers::preflight();
    }

    match (method.as_str(), path.trim_end_matches('/')) {
        ("GET", "") => helpers::json_response(200, &json!({ "message": HEALTH_MESSAGE })),
        ("POST", "/summarize") => handle_summarize(summarizer, payload).await,
        _ => {
            warn!(method = %method, raw_path = %path, "No route");
            helpers::err_response(404, "Not Found")
        }
    }
}

async fn handle_summarize<T, G>(summarizer: &Summarizer<T, G>, payload: &Value) -> Value
where
    T: TextTokenizer + ?Sized,
    G: Generator + ?Sized,
{
    let correlation_id = Uuid::new_v4().to_string();

    let request = match parsing::request_body(payload)
        .and_then(|body| parsing::parse_summarization_request(&body))
    {
        Ok(r) => r,
        Err(e) => {
            warn!(%correlation_id, "Rejected request body: {}", e);
            return helpers::error_from(&e);
        }
    };

    match summarizer.summarize(&request).await {
        Ok(response) => {
            info!(%correlation_id, generated = response.message.is_none(), "Summary ready");
            helpers::json_response(200, &response)
        }
        Err(e @ SummarizerError::Validation(_)) => {
            warn!(%correlation_id, "Validation failed: {}", e);
            helpers::error_from(&e)
        }
        Err(e) => {
            error!(%correlation_id, "Summarization failed: {}", e);
            helpers::error_from(&e)
        }
    }
}
