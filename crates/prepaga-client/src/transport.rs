//! HTTP transport and response handling.
//!
//! Every endpoint goes through [`Transport::send`]; [`HttpTransport`] is the
//! reqwest implementation and [`MockTransport`] replays canned responses
//! for tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::{ApiError, ApiResult};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Could not build HTTP client: {0}")]
    Build(String),

    #[error("Request failed: {0}")]
    Connection(String),

    #[error("No response queued for {0}")]
    NoResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Raw response: status line and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: default_reason(status).to_string(),
            body: body.into(),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn no_content() -> Self {
        Self::new(204, "")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn default_reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// Sends one request and returns the raw response.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, self.config.url(&request.path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

/// Send a request and decode its JSON body.
///
/// Failures are logged with the method and path before being returned.
pub fn dispatch<T: Transport>(transport: &T, request: &ApiRequest) -> ApiResult<Value> {
    debug!(method = %request.method, path = %request.path, "Sending request");
    let result = transport
        .send(request)
        .map_err(ApiError::from)
        .and_then(handle_response);
    if let Err(e) = &result {
        error!(method = %request.method, path = %request.path, error = %e, "Request failed");
    }
    result
}

/// 204 and empty bodies become `Value::Null`; non-2xx statuses become
/// [`ApiError::Status`] with the server's message.
pub fn handle_response(response: ApiResponse) -> ApiResult<Value> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            message: error_message(&response),
        });
    }
    if response.status == 204 || response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Message for a rejected call: the joined `errors[].msg` list, then
/// `message`, then `error`, then the status line.
pub fn error_message(response: &ApiResponse) -> String {
    let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("msg").and_then(Value::as_str))
            .collect();
        if !messages.is_empty() {
            return format!("Errores de validación: {}", messages.join(", "));
        }
    }

    for key in ["message", "error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    format!("Error {}: {}", response.status, response.reason)
}

/// Transport that records every request and replays queued responses in
/// order. Used by tests; no network access.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn respond(&self, response: ApiResponse) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    pub fn respond_json(&self, body: Value) -> &Self {
        self.respond(ApiResponse::ok(body))
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| TransportError::NoResponse(format!("{} {}", request.method, request.path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_content_is_null() {
        assert_eq!(handle_response(ApiResponse::no_content()).unwrap(), Value::Null);
        assert_eq!(handle_response(ApiResponse::new(200, "")).unwrap(), Value::Null);
    }

    #[test]
    fn test_success_body_is_decoded() {
        let value = handle_response(ApiResponse::ok(json!({"dni": "1"}))).unwrap();
        assert_eq!(value["dni"], "1");

        let err = handle_response(ApiResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_error_message_precedence() {
        let msg = |status, body: &str| error_message(&ApiResponse::new(status, body));

        assert_eq!(
            msg(400, r#"{"message":"DNI duplicado","error":"Bad Request"}"#),
            "DNI duplicado"
        );
        assert_eq!(msg(400, r#"{"error":"Bad Request"}"#), "Bad Request");
        assert_eq!(
            msg(422, r#"{"errors":[{"msg":"dni requerido"},{"msg":"nombre requerido"}]}"#),
            "Errores de validación: dni requerido, nombre requerido"
        );
        assert_eq!(
            msg(400, r#"{"message":"Validation failed","errors":[{"msg":"CUIT inválido"}]}"#),
            "Errores de validación: CUIT inválido"
        );
        assert_eq!(
            msg(400, r#"{"message":"Falta el CUIT","errors":[]}"#),
            "Falta el CUIT"
        );
        assert_eq!(msg(500, "not json"), "Error 500: Internal Server Error");
        assert_eq!(msg(404, "{}"), "Error 404: Not Found");
    }

    #[test]
    fn test_non_success_is_status_error() {
        let err = handle_response(ApiResponse::new(404, r#"{"message":"No existe"}"#)).unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No existe");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mock_records_and_replays() {
        let mock = MockTransport::new();
        mock.respond_json(json!([]));

        let value = dispatch(&mock, &ApiRequest::get("/api/plans")).unwrap();
        assert_eq!(value, json!([]));

        let err = dispatch(&mock, &ApiRequest::delete("/providers/1")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::NoResponse(_))));

        let sent = mock.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].method, HttpMethod::Delete);
    }

    #[test]
    fn test_http_transport_builds() {
        let transport = HttpTransport::new(ClientConfig::default()).unwrap();
        assert_eq!(transport.config().base_url, "http://localhost:3000");
    }
}
