//! Bearer token authentication and role gating.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{RoleName, BEARER_TOKEN_PREFIX};

use crate::api::state::AppState;

/// Identity taken from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: RoleName,
}

/// Verify the bearer token and attach `CurrentUser` to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = state.auth.verify_token(extract_token(&request)?)?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Reject callers whose role ranks below `required`. Must run after `auth_middleware`.
pub async fn require_role(
    State(required): State<RoleName>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.role.satisfies(required) {
        tracing::debug!(user_id = %user.id, role = %user.role, %required, "Role too low");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    match auth_header.strip_prefix(BEARER_TOKEN_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized),
    }
}
