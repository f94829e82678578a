// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use tracing::{debug, enabled, Level};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";
const REDACTED_FIELDS: [&str; 3] = ["password", "password_hash", "token"];

/// Logs redacted request/response bodies and tags each exchange with a request id.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let response = if enabled!(Level::DEBUG) {
        let (parts, body) = request.into_parts();

        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        if let Some(logged) = loggable_body(&bytes) {
            debug!(
                request_id = %request_id,
                method = %parts.method,
                uri = %parts.uri,
                request_body = %logged,
                "📥 Request"
            );
        }

        let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        if let Some(logged) = loggable_body(&bytes) {
            debug!(
                request_id = %request_id,
                status = %parts.status,
                response_body = %logged,
                "📤 Response"
            );
        }

        Response::from_parts(parts, Body::from(bytes))
    } else {
        next.run(request).await
    };

    let mut response = response;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(response)
}

/// Text form of a body for the debug log; JSON bodies are redacted.
fn loggable_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let body_str = std::str::from_utf8(bytes).ok()?;

    match serde_json::from_str::<Value>(body_str) {
        Ok(mut json) => {
            redact(&mut json);
            Some(serde_json::to_string(&json).unwrap_or_else(|_| "<unprintable>".to_string()))
        }
        Err(_) => Some(body_str.to_string()),
    }
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *field = Value::String("[REDACTED]".to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}
