use axum::Json;
use tracing::{info, instrument};

use crate::dto::{BaseUser, CommonQueryParams, UserIn};
use crate::extract::{ValidJson, ValidQuery};

/// Handler for registering a user
///
/// This function handles POST requests to `/user/`.
///
/// ### Returns
///
/// The public part of the user. `BaseUser` has no password field, so the
/// password cannot reach the response.
#[instrument(skip(user), fields(username = %user.base.username))]
pub async fn create_user_handler(ValidJson(user): ValidJson<UserIn>) -> Json<BaseUser> {
    info!("Registering user");
    Json(BaseUser::from(user))
}

/// Handler echoing the common query parameters
///
/// This function handles GET requests to `/users/`.
pub async fn list_users_handler(
    ValidQuery(commons): ValidQuery<CommonQueryParams>,
) -> Json<CommonQueryParams> {
    Json(commons)
}
