use axum::Json;
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::errors::UnicornError;
use crate::extract::ValidPath;

/// The one unicorn name the endpoint refuses
const FORBIDDEN_UNICORN: &str = "yolo";

/// Handler for looking up a unicorn
///
/// This function handles GET requests to `/unicorns/{name}`.
///
/// ### Returns
///
/// `{"unicorn_name": name}`, or a `UnicornError` (418) for "yolo"
#[instrument]
pub async fn read_unicorn_handler(
    ValidPath(name): ValidPath<String>,
) -> Result<Json<Value>, UnicornError> {
    if name == FORBIDDEN_UNICORN {
        warn!("unicorn misbehaved");
        return Err(UnicornError { name });
    }
    Ok(Json(json!({ "unicorn_name": name })))
}
