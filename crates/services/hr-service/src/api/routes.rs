//! Route configuration.

use std::sync::Arc;

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use domain::RoleName;

use crate::api::handlers::{
    auth_routes, department_routes, employee_routes, file_routes, health_routes, profile_routes,
    user_routes,
};
use crate::api::middleware::{api_key_middleware, auth_middleware, require_role, security_headers};
use crate::api::openapi::ApiDoc;
use crate::api::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .nest("/department", department_routes())
        .nest("/employee", employee_routes())
        .nest("/file", file_routes())
        .nest("/user", profile_routes())
        .route_layer(middleware::from_fn_with_state(RoleName::Admin, require_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let router = Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes(state.clone()))
        .nest("/v1", v1);

    let router = match state.config.required_api_key() {
        Some(key) => {
            let key: Arc<str> = Arc::from(key);
            router.layer(middleware::from_fn_with_state(key, api_key_middleware))
        }
        None => router,
    };

    router
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}
