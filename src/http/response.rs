//! HTTP response building module
//!
//! Builders for the JSON and empty responses the item API produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build a JSON response, falling back to 500 if `body` fails to serialize
pub fn build_json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => json_with_status(status, Bytes::from(json)),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            json_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"message":"Internal server error"}"#),
            )
        }
    }
}

/// Build `{"message": ...}` with the given status
pub fn build_message_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    build_json_response(status, &serde_json::json!({ "message": message }))
}

/// Build 204 No Content response
pub fn build_no_content_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Stamp the `Server` header on an outgoing response
pub fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(_) => crate::logger::log_warning(&format!(
            "http.server_name '{server_name}' is not a valid header value"
        )),
    }
}

fn json_with_status(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
