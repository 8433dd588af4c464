//! Static API key check, mounted outside development.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use common::AppError;
use domain::API_KEY_HEADER;

/// Expects `x-api-key: <scheme> <key>`: exactly two space-separated parts,
/// the second equal to the configured key.
pub async fn api_key_middleware(
    State(expected): State<Arc<str>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingApiKey)?;

    match header.split(' ').collect::<Vec<_>>().as_slice() {
        [_, key] if *key == &*expected => Ok(next.run(request).await),
        _ => Err(AppError::InvalidApiKey),
    }
}
