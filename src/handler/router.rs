//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, body buffering,
//! dispatch to the item operations and access logging.

use crate::config::AppState;
use crate::handler::error::ApiError;
use crate::handler::items;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

const COLLECTION_PATH: &str = "/shopping-list";

/// Operation selected by method and path
///
/// The id routes carry `None` when the digits do not fit in a `u64`; such an
/// id matches no stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Update(Option<u64>),
    Delete(Option<u64>),
    NotFound,
}

/// Map a request line onto an operation
///
/// GET and POST accept any path starting with `/shopping-list`, so they win
/// over the id routes. PUT and DELETE need `/shopping-list/<digits>`; anything
/// after the digits is ignored.
pub fn resolve_route(method: &Method, path: &str) -> Route {
    let in_collection = path.starts_with(COLLECTION_PATH);
    match *method {
        Method::GET if in_collection => Route::List,
        Method::POST if in_collection => Route::Create,
        Method::PUT => parse_item_id(path).map_or(Route::NotFound, Route::Update),
        Method::DELETE => parse_item_id(path).map_or(Route::NotFound, Route::Delete),
        _ => Route::NotFound,
    }
}

fn parse_item_id(path: &str) -> Option<Option<u64>> {
    let rest = path.strip_prefix(COLLECTION_PATH)?.strip_prefix('/')?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    Some(rest[..digits_end].parse().ok())
}

/// Main entry point for HTTP request handling
///
/// Generic over the body so the same path serves live connections and
/// in-memory requests.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let route = resolve_route(&parts.method, parts.uri.path());
    logger::log_debug(&format!(
        "{} {} -> {route:?}",
        parts.method,
        parts.uri.path()
    ));

    let store = state.store.as_ref();
    let max_body_size = state.config.http.max_body_size;

    let result = match route {
        Route::List => items::list_items(store),
        Route::Create => match read_body(&parts, body, max_body_size).await {
            Ok(bytes) => items::create_item(store, &bytes),
            Err(e) => Err(e),
        },
        Route::Update(id) => match read_body(&parts, body, max_body_size).await {
            Ok(bytes) => items::update_item(store, id, &bytes),
            Err(e) => Err(e),
        },
        Route::Delete(id) => items::delete_item(store, id),
        Route::NotFound => Err(ApiError::RouteNotFound),
    };

    let mut response = result.unwrap_or_else(|e| {
        if let ApiError::BodyRead(detail) = &e {
            logger::log_warning(&format!("Failed to read request body: {detail}"));
        }
        e.into_response()
    });
    http::set_server_header(&mut response, &state.config.http.server_name);

    if state.cached_access_log.load(Ordering::Relaxed) {
        log_access(&parts, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Buffer the full request body, refusing anything over `max_body_size`
async fn read_body<B>(parts: &Parts, body: B, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if let Some(length) = declared_length(parts) {
        if length > max_body_size {
            logger::log_warning(&format!(
                "Request body too large: {length} bytes (max: {max_body_size})"
            ));
            return Err(ApiError::PayloadTooLarge);
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!(
                "Request body exceeded {max_body_size} bytes while streaming"
            ));
            Err(ApiError::PayloadTooLarge)
        }
        Err(e) => Err(ApiError::BodyRead(e.to_string())),
    }
}

fn declared_length(parts: &Parts) -> Option<u64> {
    let value = parts.headers.get(CONTENT_LENGTH)?;
    let parsed = value.to_str().ok().and_then(|s| s.trim().parse().ok());
    if parsed.is_none() {
        logger::log_warning("Invalid Content-Length value, skipping size check");
    }
    parsed
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = match parts.version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.user_agent = parts
        .headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}
