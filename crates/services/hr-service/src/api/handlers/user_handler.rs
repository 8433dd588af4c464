//! Account management handlers.

use axum::{
    extract::{Extension, Path, State},
    middleware,
    response::Json,
    routing::{get, patch},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{AccountResponse, AccountStats, RoleName};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::{auth_middleware, require_role, CurrentUser};
use crate::api::state::AppState;
use crate::dto::{
    AccountEnvelope, AccountListResponse, CreateAccountRequest, IdResponse, ListAccountsParams,
    StatsParams, UpdateAccountRequest,
};

/// `/me` is open to every authenticated role; the rest needs `Admin` or higher.
pub fn user_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/stats", get(get_stats))
        .route("/:id", get(get_user).put(update_user).delete(hard_delete_user))
        .route("/:id/soft-delete", patch(soft_delete_user))
        .route("/:id/restore", patch(restore_user))
        .route_layer(middleware::from_fn_with_state(RoleName::Admin, require_role));

    Router::new()
        .route("/me", get(get_current_user))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Get current authenticated account
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AccountEnvelope>> {
    let account = state.accounts.get_by_id(current_user.id).await?;
    Ok(Json(AccountEnvelope {
        user: AccountResponse::from(account),
    }))
}

/// List accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListAccountsParams),
    responses(
        (status = 200, description = "Page of accounts", body = AccountListResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListAccountsParams>,
) -> AppResult<Json<AccountListResponse>> {
    let accounts = state.accounts.list(params).await?;
    Ok(Json(AccountListResponse {
        users: accounts.into_iter().map(AccountResponse::from).collect(),
    }))
}

/// Count accounts by deletion state
#[utoipa::path(
    get,
    path = "/users/stats",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(StatsParams),
    responses(
        (status = 200, description = "Account counts", body = AccountStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<StatsParams>,
) -> AppResult<Json<AccountStats>> {
    let stats = state.accounts.get_stats(params.search).await?;
    Ok(Json(stats))
}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account", body = AccountEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountEnvelope>> {
    let account = state.accounts.get_by_id(id).await?;
    Ok(Json(AccountEnvelope {
        user: AccountResponse::from(account),
    }))
}

/// Create an account with an explicit role
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = IdResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAccountRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state.accounts.create(request).await?;
    Ok(Json(IdResponse { id }))
}

/// Replace name, email and password
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = IdResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state.accounts.update(id, request).await?;
    Ok(Json(IdResponse { id }))
}

/// Soft delete an account
#[utoipa::path(
    patch,
    path = "/users/{id}/soft-delete",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account soft deleted", body = IdResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn soft_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IdResponse>> {
    let id = state.accounts.soft_delete(id).await?;
    Ok(Json(IdResponse { id }))
}

/// Restore a soft-deleted account
#[utoipa::path(
    patch,
    path = "/users/{id}/restore",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account restored", body = IdResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Deleted account not found"),
        (status = 409, description = "Email taken by another active account")
    )
)]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IdResponse>> {
    let id = state.accounts.restore(id).await?;
    Ok(Json(IdResponse { id }))
}

/// Permanently delete an account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account removed", body = IdResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Account still manages a department")
    )
)]
pub async fn hard_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IdResponse>> {
    let id = state.accounts.hard_delete(id).await?;
    Ok(Json(IdResponse { id }))
}
