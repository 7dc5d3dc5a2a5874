use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::SummarizationRequest;
use crate::errors::SummarizerError;

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    cur.as_str()
}

/// Request path for both HTTP API (v2) and REST API (v1) payloads.
pub fn request_path(payload: &Value) -> &str {
    v_str(payload, &["rawPath"])
        .or_else(|| v_str(payload, &["path"]))
        .unwrap_or("/")
}

/// Upper-cased HTTP method for both payload versions.
pub fn request_method(payload: &Value) -> String {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Raw request body, decoding it when API Gateway marked it base64.
pub fn request_body(payload: &Value) -> Result<String, SummarizerError> {
    let body = payload.get("body").and_then(Value::as_str).unwrap_or("");
    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| SummarizerError::Validation(format!("invalid request body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SummarizerError::Validation(format!("invalid request body: {e}")))
}

/// Parses a `{text, level}` JSON body. Missing fields become empty strings
/// so they fail the same validation as empty values.
pub fn parse_summarization_request(body: &str) -> Result<SummarizationRequest, SummarizerError> {
    serde_json::from_str(body)
        .map_err(|e| SummarizerError::Validation(format!("invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_prefers_raw_path() {
        let payload = json!({ "rawPath": "/summarize/", "path": "/other" });
        assert_eq!(request_path(&payload), "/summarize/");
        assert_eq!(request_path(&json!({ "path": "/v1" })), "/v1");
        assert_eq!(request_path(&json!({})), "/");
    }

    #[test]
    fn method_reads_both_payload_versions() {
        let v2 = json!({ "requestContext": { "http": { "method": "post" } } });
        assert_eq!(request_method(&v2), "POST");
        assert_eq!(request_method(&json!({ "httpMethod": "OPTIONS" })), "OPTIONS");
    }

    #[test]
    fn base64_body_is_decoded() {
        let encoded = STANDARD.encode(r#"{"text":"hi","level":"normal"}"#);
        let payload = json!({ "body": encoded, "isBase64Encoded": true });
        assert_eq!(
            request_body(&payload).unwrap(),
            r#"{"text":"hi","level":"normal"}"#
        );
    }

    #[test]
    fn missing_fields_parse_as_empty() {
        let req = parse_summarization_request(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(req.text, "hello");
        assert_eq!(req.level, "");
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_summarization_request("{not json").unwrap_err();
        assert!(matches!(err, SummarizerError::Validation(_)));
        assert!(err.to_string().starts_with("invalid request body"));
    }
}
