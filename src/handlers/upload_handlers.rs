use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::dto::LoginForm;
use crate::errors::ApiError;
use crate::extract::ValidForm;
use crate::upload::UploadForm;

/// Handler for form login
///
/// This function handles POST requests to `/login/`. The password is accepted
/// but never echoed.
#[instrument(skip(form), fields(username = %form.username))]
pub async fn login_handler(ValidForm(form): ValidForm<LoginForm>) -> Json<Value> {
    info!("Login form received");
    Json(json!({ "username": form.username }))
}

/// Handler for an optional raw file
///
/// This function handles POST requests to `/files/`.
///
/// ### Returns
///
/// `{"file_size": n}` for a non-empty `file` part, otherwise
/// `{"message": "No file sent"}`
#[instrument(skip_all)]
pub async fn create_file_handler(form: UploadForm) -> Json<Value> {
    match form.get("file") {
        Some(file) if !file.data.is_empty() => {
            debug!(size = file.data.len(), "file received");
            Json(json!({ "file_size": file.data.len() }))
        }
        _ => Json(json!({ "message": "No file sent" })),
    }
}

/// Handler for a named upload
///
/// This function handles POST requests to `/uploadfile/`.
#[instrument(skip_all)]
pub async fn create_upload_file_handler(form: UploadForm) -> Result<Json<Value>, ApiError> {
    let file = form.file("file")?;
    Ok(Json(json!({ "filename": file.filename })))
}

/// Handler mixing two files and a text field
///
/// This function handles POST requests to `/files/one/`. All three parts are
/// required; every missing one is reported.
#[instrument(skip_all)]
pub async fn create_file_one_handler(form: UploadForm) -> Result<Json<Value>, ApiError> {
    form.require(&["file", "fileb", "token"])?;

    let file = form.file("file")?;
    let fileb = form.file("fileb")?;
    let token = form.text("token")?;

    Ok(Json(json!({
        "file_size": file.data.len(),
        "token": token,
        "fileb_content_type": fileb.content_type,
    })))
}
