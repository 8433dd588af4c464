//! Registration and login handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use common::AppResult;

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::dto::{IdResponse, LoginRequest, RegisterRequest, TokenResponse};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account with the `User` role
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = IdResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state.auth.register(request).await?;
    Ok(Json(IdResponse { id }))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Credentials do not match"),
        (status = 404, description = "Email not found")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth.login(request).await?;
    Ok(Json(token))
}
