//! The caller's own profile.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::ProfileResponse;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::dto::UpdateProfileRequest;

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).patch(update_profile))
}

#[utoipa::path(
    get,
    path = "/v1/user",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse>> {
    let account = state.accounts.get_by_id(current_user.id).await?;
    Ok(Json(account.into()))
}

/// Update some of the caller's profile fields
#[utoipa::path(
    patch,
    path = "/v1/user",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let account = state.accounts.update_profile(current_user.id, request).await?;
    Ok(Json(account.into()))
}
