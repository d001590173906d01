use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensures every request carries `X-Request-Id` and echoes it on the response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = match incoming_id(req.headers()) {
        Some(v) => v,
        None => {
            let nanos = Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
            match HeaderValue::from_str(&format!("req-{nanos}")) {
                Ok(v) => v,
                Err(_) => return next.run(req).await,
            }
        }
    };

    req.headers_mut().insert(REQUEST_ID_HEADER, id.clone());
    let mut res = next.run(req).await;
    res.headers_mut().insert(REQUEST_ID_HEADER, id);
    res
}

fn incoming_id(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(REQUEST_ID_HEADER)
        .filter(|h| h.to_str().map(|s| !s.trim().is_empty()).unwrap_or(false))
        .cloned()
}

/// Request id for log lines ("-" when absent).
pub fn request_id_of(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
}
