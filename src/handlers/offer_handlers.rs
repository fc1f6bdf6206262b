use axum::Json;
use tracing::{info, instrument};

use crate::dto::Offer;
use crate::extract::ValidJson;

/// Handler that echoes a validated offer
///
/// This function handles POST requests to `/offers/`.
#[instrument(skip(offer), fields(name = %offer.name, items = offer.items.len()))]
pub async fn create_offer_handler(ValidJson(offer): ValidJson<Offer>) -> Json<Offer> {
    info!("Offer accepted");
    Json(offer)
}
