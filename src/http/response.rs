//! HTTP response building module
//!
//! Builders for the responses the quote server emits. None of them panic:
//! a builder failure is logged and degrades to a bare response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::CachePolicy;

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, policy: CachePolicy) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", policy.to_header_value())
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found", is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOW);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOW)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health check response
pub fn build_health_response(status: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, status, is_head)
}

fn build_text_response(status: StatusCode, text: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(
        status,
        "text/plain; charset=utf-8",
        Bytes::from(text.to_string()),
        CachePolicy::NoStore,
        is_head,
    )
}

/// Build HTML page response; dynamic pages are never cached
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(
        StatusCode::OK,
        "text/html; charset=utf-8",
        Bytes::from(content),
        CachePolicy::NoStore,
        is_head,
    )
}

/// Build JSON response; dynamic payloads are never cached
pub fn build_json_response<T: Serialize>(body: &T, is_head: bool) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_body_response(
            StatusCode::OK,
            "application/json",
            Bytes::from(json),
            CachePolicy::NoStore,
            is_head,
        ),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_body_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "application/json",
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
                CachePolicy::NoStore,
                is_head,
            )
        }
    }
}

/// Build a cacheable static asset response with `ETag`
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    policy: CachePolicy,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut resp = build_body_response(StatusCode::OK, content_type, data, policy, is_head);
    if let Ok(value) = hyper::header::HeaderValue::from_str(etag) {
        resp.headers_mut().insert("ETag", value);
    }
    resp
}

/// Shared builder: `Content-Length` always reflects the full body, HEAD
/// responses drop the body itself
fn build_body_response(
    status: StatusCode,
    content_type: &str,
    data: Bytes,
    policy: CachePolicy,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Cache-Control", policy.to_header_value())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response() {
        let resp = build_json_response(&serde_json::json!({"content": "hi"}), false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Cache-Control"], "no-store");
        assert_eq!(body_string(resp).await, r#"{"content":"hi"}"#);
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_html_response("<p>hello</p>".to_string(), true);
        assert_eq!(resp.headers()["Content-Length"], "12");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_405_has_allow() {
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], ALLOW);
    }

    #[test]
    fn test_options_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let resp = build_options_response(false);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_cached_response_headers() {
        let resp = build_cached_response(
            Bytes::from_static(b"body{}"),
            "text/css",
            "\"abc\"",
            CachePolicy::Public(3600),
            false,
        );
        assert_eq!(resp.headers()["ETag"], "\"abc\"");
        assert_eq!(resp.headers()["Cache-Control"], "public, max-age=3600");
    }
}
