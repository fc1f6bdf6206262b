use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::dto::{CommonQueryParams, EmbeddedItem, FakeItemPage, Item, ItemNameQuery, UpdatedItem};
use crate::errors::ApiError;
use crate::extract::{ValidJson, ValidPath, ValidQuery};
use crate::fake_db;
use crate::guards::{VerifiedKey, VerifiedToken};

/// Handler for creating an item by name
///
/// This function handles POST requests to `/item/`.
///
/// ### Arguments
///
/// * `query` - The `name` query parameter
///
/// ### Returns
///
/// `201 Created` with `{"name": ...}`
#[instrument(skip(query), fields(name = %query.name))]
pub async fn create_item_handler(
    ValidQuery(query): ValidQuery<ItemNameQuery>,
) -> (StatusCode, Json<Value>) {
    info!("Creating item");
    (StatusCode::CREATED, Json(json!({ "name": query.name })))
}

/// Handler for retrieving a named item from the fake store
///
/// This function handles GET requests to `/items/{item_id}`.
///
/// ### Arguments
///
/// * `item_id` - The key to look up, extracted from the URL path
///
/// ### Returns
///
/// `{"item": name}`, or a 404 with detail "Item not found"
#[instrument]
pub async fn get_item_handler(
    ValidPath(item_id): ValidPath<String>,
) -> Result<Json<Value>, ApiError> {
    debug!("Retrieving item");

    let item = fake_db::lookup_item(&item_id)
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    Ok(Json(json!({ "item": item })))
}

/// Handler for replacing an item
///
/// This function handles PUT requests to `/items/{item_id}`. The item is
/// expected under an `item` key in the body.
#[instrument(skip(payload))]
pub async fn update_item_handler(
    ValidPath(item_id): ValidPath<i64>,
    ValidJson(payload): ValidJson<EmbeddedItem>,
) -> Json<UpdatedItem> {
    info!(name = %payload.item.name, "Updating item");
    Json(UpdatedItem {
        item_id,
        item: payload.item,
    })
}

/// Handler for paging through the fake item listing
///
/// This function handles GET requests to `/items/`. `q` is echoed back only
/// when it is non-empty.
#[instrument(skip(commons), fields(skip = commons.skip, limit = commons.limit))]
pub async fn list_items_handler(
    ValidQuery(commons): ValidQuery<CommonQueryParams>,
) -> Json<FakeItemPage> {
    let items = fake_db::fake_items_page(commons.skip, commons.limit).to_vec();
    debug!("Returning {} items", items.len());

    Json(FakeItemPage {
        q: commons.q.filter(|q| !q.is_empty()),
        items,
    })
}

/// Handler for the header-guarded listing
///
/// This function handles GET requests to `/items/one/`. It only runs once
/// both `X-Token` and `X-Key` have been checked.
#[instrument(skip_all)]
pub async fn list_items_one_handler(
    _token: VerifiedToken,
    _key: VerifiedKey,
) -> Json<Value> {
    Json(json!([{ "item": "Foo" }, { "item": "Bar" }]))
}

/// Handler that echoes a validated item
///
/// This function handles POST requests to `/items/three/`.
#[instrument(skip(item), fields(name = %item.name))]
pub async fn create_item_three_handler(
    ValidJson(item): ValidJson<Item>,
) -> Json<Item> {
    Json(item)
}

/// Handler for a fixed list of items
///
/// This function handles GET requests to `/items/four/`; every optional field
/// is serialized with its default.
pub async fn list_items_four_handler() -> Json<Vec<Item>> {
    Json(vec![Item::new("Portal Gun", 42.0), Item::new("Plumbus", 32.0)])
}
