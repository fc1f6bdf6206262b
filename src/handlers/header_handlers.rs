use axum::{http::HeaderMap, Json};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

/// Echoes the `ads_id` cookie, or null
///
/// This function handles GET requests to `/items/ads/`.
pub async fn read_ads_cookie_handler(jar: CookieJar) -> Json<Value> {
    let ads_id = jar.get("ads_id").map(|cookie| cookie.value().to_string());
    Json(json!({ "ads_id": ads_id }))
}

/// Echoes the `strange-header` header, or null
///
/// This function handles GET requests to `/items/strange/`.
pub async fn read_strange_header_handler(headers: HeaderMap) -> Json<Value> {
    let strange_header = headers
        .get("strange-header")
        .and_then(|value| value.to_str().ok());
    Json(json!({ "strange_header": strange_header }))
}

/// Echoes every `X-Token` header in order, or null if none were sent
///
/// This function handles GET requests to `/items/two/`.
pub async fn read_token_values_handler(headers: HeaderMap) -> Json<Value> {
    let values: Vec<&str> = headers
        .get_all("x-token")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    let values = (!values.is_empty()).then_some(values);
    Json(json!({ "X-Token values": values }))
}
