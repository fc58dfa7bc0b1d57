//! Request logging middleware with header redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderLogging {
    Plain,
    Redacted,
    Skipped,
}

/// Logs each request and its outcome. Spans come from `TraceLayer`; this
/// middleware opens none of its own.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = matched_path(&request);
    let request_id = request_id(request.headers());

    info!(
        method = %method,
        path = %path,
        uri = %request.uri(),
        request_id = %request_id,
        headers = %loggable_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status,
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

fn matched_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

fn header_logging(name: &str) -> HeaderLogging {
    match name {
        "authorization" | "proxy-authorization" | "cookie" | "x-api-key" => {
            HeaderLogging::Redacted
        }
        "content-type" | "content-length" | "accept" | "user-agent" | "x-forwarded-for" => {
            HeaderLogging::Plain
        }
        _ => HeaderLogging::Skipped,
    }
}

/// Render the headers worth logging, redacting credentials
fn loggable_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter_map(|(name, value)| match header_logging(name.as_str()) {
            HeaderLogging::Plain => Some(format!(
                "{}={}",
                name,
                value.to_str().unwrap_or("[invalid]")
            )),
            HeaderLogging::Redacted => Some(format!("{}=[REDACTED]", name)),
            HeaderLogging::Skipped => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_logging_policy() {
        assert_eq!(header_logging("authorization"), HeaderLogging::Redacted);
        assert_eq!(header_logging("cookie"), HeaderLogging::Redacted);
        assert_eq!(header_logging("content-type"), HeaderLogging::Plain);
        assert_eq!(header_logging("etag"), HeaderLogging::Skipped);
    }

    #[test]
    fn test_loggable_headers() {
        let request = Request::builder()
            .uri("/v1/models/m-1/validate")
            .header("authorization", "Bearer abc")
            .header("content-type", "multipart/form-data; boundary=x")
            .header("cache-control", "no-cache")
            .body(Body::empty())
            .unwrap();

        let logged = loggable_headers(request.headers());

        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("content-type=multipart/form-data; boundary=x"));
        assert!(!logged.contains("cache-control"));
        assert!(!logged.contains("abc"));
    }

    #[test]
    fn test_request_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "-");

        headers.insert(REQUEST_ID_HEADER, "req-42".parse().unwrap());
        assert_eq!(request_id(&headers), "req-42");
    }
}
