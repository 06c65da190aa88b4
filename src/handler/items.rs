//! Shopping list operations
//!
//! Each operation loads the full collection, changes it in memory and writes
//! it back. A failed write is logged but does not change the response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::error::ApiError;
use super::validate::parse_item;
use crate::http;
use crate::logger;
use crate::store::{next_id, Item, ItemStore};

type ApiResult = Result<Response<Full<Bytes>>, ApiError>;

/// GET: the whole collection
#[allow(clippy::unnecessary_wraps)]
pub fn list_items(store: &dyn ItemStore) -> ApiResult {
    let items = store.load();
    Ok(http::build_json_response(StatusCode::OK, &items))
}

/// POST: validate, assign the next id, append
pub fn create_item(store: &dyn ItemStore, body: &[u8]) -> ApiResult {
    let mut item = parse_item(body)?;

    let mut items = store.load();
    item.set_id(next_id(&items));
    items.push(item.clone());
    persist(store, &items);

    Ok(http::build_json_response(StatusCode::CREATED, &item))
}

/// PUT: validate, then shallow-merge onto the first item with `id`
pub fn update_item(store: &dyn ItemStore, id: Option<u64>, body: &[u8]) -> ApiResult {
    let update = parse_item(body)?;

    let mut items = store.load();
    let Some(existing) = items.iter_mut().find(|item| has_id(item, id)) else {
        return Err(ApiError::ItemNotFound);
    };
    existing.merge(update);
    let merged = existing.clone();
    persist(store, &items);

    Ok(http::build_json_response(StatusCode::OK, &merged))
}

/// DELETE: drop every item carrying `id`
pub fn delete_item(store: &dyn ItemStore, id: Option<u64>) -> ApiResult {
    let mut items = store.load();
    let before = items.len();
    items.retain(|item| !has_id(item, id));
    if items.len() == before {
        return Err(ApiError::ItemNotFound);
    }
    persist(store, &items);

    Ok(http::build_no_content_response())
}

/// An unrepresentable request id (`None`) matches nothing
fn has_id(item: &Item, id: Option<u64>) -> bool {
    id.is_some() && item.id() == id
}

fn persist(store: &dyn ItemStore, items: &[Item]) {
    if let Err(e) = store.save(items) {
        logger::log_storage_error(&format!("Error writing to shopping list file: {e}"));
    }
}
