//! HTTP fetching utilities shared by the content source and the provider client

use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::constants::RESPONSE_PREVIEW_CHARS;
use crate::error::AppError;

/// Sends a request and returns the body of a successful response.
///
/// Non-success statuses become the matching transport error; the upstream's
/// own `message` (or `error`) field is carried when the body has one. No
/// retry is attempted.
#[instrument(skip(request))]
pub(crate) async fn send_for_body(request: RequestBuilder, url: &str) -> Result<String, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| request_error(e, url))?;
    read_success_body(response, url).await
}

pub(crate) async fn read_success_body(response: Response, url: &str) -> Result<String, AppError> {
    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = upstream_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        error!("HTTP {} - {} (URL: {})", status_code, message, url);
        return Err(AppError::from_status(status_code, message, url));
    }

    let body = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        AppError::ApiFetch(e)
    })?;

    debug!("Response length: {} bytes", body.len());
    let preview: String = body.chars().take(RESPONSE_PREVIEW_CHARS).collect();
    debug!("Response text (first {RESPONSE_PREVIEW_CHARS} chars): {preview}");

    Ok(body)
}

/// Classifies a failed send as timeout, connection or generic fetch error.
pub(crate) fn request_error(e: reqwest::Error, url: &str) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Extracts a human-readable message from an upstream JSON error body.
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Parses a collection body. Anything other than a JSON array of records is a
/// transport-tier failure, never a validation one.
pub(crate) fn parse_json_array(body: &str, url: &str) -> Result<Vec<Value>, AppError> {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return Err(AppError::api_malformed_json("Response body is empty", url));
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(other) => {
            error!("Expected a JSON array from {url}, received {}", json_kind(&other));
            Err(AppError::api_unexpected_structure(
                format!("Expected a JSON array, received {}", json_kind(&other)),
                url,
            ))
        }
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                body.chars().take(200).collect::<String>()
            );
            Err(AppError::api_malformed_json(e.to_string(), url))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::api::http_client::create_test_http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_success_body_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "slug": "a" }])))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/api/teams", server.uri());
        let body = send_for_body(client.get(&url), &url).await.unwrap();
        assert_eq!(parse_json_array(&body, &url).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_carries_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "relation does not exist" })),
            )
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/api/teams", server.uri());
        let error = send_for_body(client.get(&url), &url).await.unwrap_err();
        assert!(error.is_transport());
        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("relation does not exist"));
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/api/nothing", server.uri());
        let error = send_for_body(client.get(&url), &url).await.unwrap_err();
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = create_test_http_client();
        let url = "http://127.0.0.1:9/api/teams";
        let error = send_for_body(client.get(url), url).await.unwrap_err();
        assert!(error.is_transport());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_parse_json_array_rejections() {
        let url = "http://x/api/teams";
        assert!(matches!(
            parse_json_array("", url),
            Err(AppError::ApiMalformedJson { .. })
        ));
        assert!(matches!(
            parse_json_array("<html>", url),
            Err(AppError::ApiMalformedJson { .. })
        ));
        assert!(matches!(
            parse_json_array(r#"{"data": []}"#, url),
            Err(AppError::ApiUnexpectedStructure { .. })
        ));
        assert_eq!(parse_json_array("[]", url).unwrap(), Vec::<Value>::new());
    }
}
