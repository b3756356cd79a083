//! Response normalization.
//!
//! The service reports logical failures in the body (`"success": false`)
//! independently of the HTTP status. Both paths end up here: a 2xx body with
//! a false success flag and a non-2xx body in the failure shape both become
//! [`ApiError::Service`]. Anything else keeps the original transport error.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, ServiceError};

/// Failure body: `{ "success": false, "error": { "code": .., "message": .. } }`.
#[derive(Debug, Deserialize)]
struct FailureBody {
    success: bool,
    error: Option<FailureDetail>,
}

#[derive(Debug, Deserialize)]
struct FailureDetail {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Extracts a service failure from a body, if it has the failure shape.
///
/// Returns `None` for non-JSON bodies, bodies without a false `success`
/// flag, and failure bodies that lack an `error` object.
#[must_use]
pub fn parse_service_error(body: &str) -> Option<ServiceError> {
    let parsed: FailureBody = serde_json::from_str(body).ok()?;
    if parsed.success {
        return None;
    }
    let detail = parsed.error?;
    Some(ServiceError {
        code: detail.code.as_ref().map(code_text).unwrap_or_default(),
        message: detail.message.unwrap_or_default(),
    })
}

/// Parses a success-status body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not JSON and
/// [`ApiError::Service`] if it carries `"success": false`.
pub fn normalize_body(endpoint: &str, body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::decode(endpoint, e))?;

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let error = value.get("error");
        let code = error
            .and_then(|e| e.get("code"))
            .map_or_else(|| "unknown".to_string(), code_text);
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string);
        warn!(endpoint, code = %code, "service reported failure");
        return Err(ApiError::service(code, message));
    }

    Ok(value)
}

/// Normalizes a completed (or failed) request into a JSON value.
///
/// # Errors
///
/// - [`ApiError::Transport`] for network failures, and for error statuses
///   whose body is not a service failure (the original error is kept)
/// - [`ApiError::Service`] for service failure bodies on any status
/// - [`ApiError::Decode`] for a 2xx body that is not JSON
pub async fn normalize_response(
    endpoint: &str,
    outcome: Result<reqwest::Response, reqwest::Error>,
) -> Result<Value, ApiError> {
    let response = outcome.map_err(|e| ApiError::transport(endpoint, e))?;
    let status = response.status();

    let status_error = response.error_for_status_ref().err();
    if let Some(status_error) = status_error {
        debug!(endpoint, status = status.as_u16(), "error status; inspecting body");
        let body = match response.text().await {
            Ok(body) => body,
            Err(read_error) => {
                debug!(endpoint, error = %read_error.without_url(), "failed to read error body");
                return Err(ApiError::transport(endpoint, status_error));
            }
        };
        return match parse_service_error(&body) {
            Some(service) => {
                warn!(endpoint, code = %service.code, status = status.as_u16(), "service reported failure");
                Err(ApiError::Service(service))
            }
            None => Err(ApiError::transport(endpoint, status_error)),
        };
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport(endpoint, e))?;
    normalize_body(endpoint, &body)
}

fn code_text(code: &Value) -> String {
    match code {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_body_returns_success_object_unchanged() {
        let body = r#"{"success":true,"stats":{"files":3},"odd-Key":[1,2]}"#;
        let value = normalize_body("project/demo/info", body).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "stats": {"files": 3}, "odd-Key": [1, 2]})
        );
    }

    #[test]
    fn test_normalize_body_without_success_flag_passes_through() {
        let value = normalize_body("supported-languages", r#"[{"name":"German"}]"#).unwrap();
        assert_eq!(value, json!([{"name": "German"}]));
    }

    #[test]
    fn test_normalize_body_false_success_is_service_error() {
        let body = r#"{"success":false,"error":{"code":"X","message":"Y"}}"#;
        let err = normalize_body("project/demo/info", body).unwrap_err();
        let service = err.as_service().unwrap();
        assert_eq!(service.code, "X");
        assert_eq!(service.message, "Y");
        let msg = err.to_string();
        assert!(msg.contains('X') && msg.contains('Y'), "got: {msg}");
    }

    #[test]
    fn test_normalize_body_numeric_code_is_kept_as_text() {
        let body = r#"{"success":false,"error":{"code":3,"message":"API key is not valid"}}"#;
        let err = normalize_body("project/demo/info", body).unwrap_err();
        assert_eq!(err.as_service().unwrap().code, "3");
    }

    #[test]
    fn test_normalize_body_false_success_without_error_object() {
        let body = r#"{"success":false}"#;
        let err = normalize_body("project/demo/info", body).unwrap_err();
        let service = err.as_service().unwrap();
        assert_eq!(service.code, "unknown");
        assert_eq!(service.message, body);
    }

    #[test]
    fn test_normalize_body_rejects_non_json() {
        let err = normalize_body("project/demo/info", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_parse_service_error_matches_failure_shape() {
        let body = r#"{"success":false,"error":{"code":"404","message":"Not Found"}}"#;
        let err = parse_service_error(body).unwrap();
        assert_eq!(err.code, "404");
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn test_parse_service_error_ignores_other_bodies() {
        assert!(parse_service_error("Not Found").is_none());
        assert!(parse_service_error(r#"{"success":true}"#).is_none());
        assert!(parse_service_error(r#"{"success":false}"#).is_none());
        assert!(parse_service_error(r#"{"error":{"code":1}}"#).is_none());
    }
}
