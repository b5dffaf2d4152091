use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use serde_json::Value;

use crate::core::http::response_envelope::ApiResponse;

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("prompt") {
        Some("Expected a JSON body like { \"prompt\": \"Show me cheap shoes\" }.".into())
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).".into())
    } else {
        None
    }
}

fn request_id(parts: &axum::http::response::Parts) -> String {
    if let Some(h) = parts.headers.get("X-Request-Id") {
        if let Ok(v) = h.to_str() {
            if !v.trim().is_empty() {
                return v.to_string();
            }
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Rewraps plain 400/422 rejection bodies (serde/extractor messages) into the
/// standard error envelope, tagging the response with an `X-Request-Id`.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    // Only 400/422 are rewrapped — every other response passes through as-is.
    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (parts, bytes) = take_body(res).await;

    // Handler errors already carry a structured `{ error, message }` body;
    // leave those untouched.
    if serde_json::from_slice::<Value>(&bytes)
        .map(|v| v.get("error").is_some())
        .unwrap_or(false)
    {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let req_id = request_id(&parts);
    let original = String::from_utf8_lossy(&bytes);

    let envelope = ApiResponse::<()>::error(
        if status == StatusCode::BAD_REQUEST {
            "BAD_REQUEST"
        } else {
            "UNPROCESSABLE_ENTITY"
        },
        original.trim(),
        hint_for(&original),
    );

    let mut mapped = envelope.into_response_with_status(status);
    mapped.headers_mut().insert(
        "X-Request-Id",
        HeaderValue::from_str(&req_id).unwrap_or_else(|_| HeaderValue::from_static("req-invalid")),
    );
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_point_at_the_prompt_field() {
        let hint = hint_for("missing field `prompt` at line 1 column 2").expect("hint");
        assert!(hint.contains("prompt"));
    }

    #[test]
    fn unknown_messages_get_no_hint() {
        assert!(hint_for("something else entirely").is_none());
    }
}
