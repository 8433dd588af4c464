use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};

use common::AppResult;
use domain::DepartmentResponse;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::dto::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest};

pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/:id", patch(update_department).delete(delete_department))
}

/// Create a department managed by the caller
#[utoipa::path(
    post,
    path = "/v1/department",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    let department = state.departments.create(current_user.id, request).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

#[utoipa::path(
    get,
    path = "/v1/department",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(DepartmentListParams),
    responses(
        (status = 200, description = "Departments ordered by name", body = Vec<DepartmentResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<DepartmentListParams>,
) -> AppResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.departments.list(params).await?;
    Ok(Json(departments.into_iter().map(DepartmentResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/v1/department/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department renamed", body = DepartmentResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateDepartmentRequest>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.departments.update(id, request).await?;
    Ok(Json(department.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/department/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Employees still belong to the department")
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.departments.delete(id).await?;
    Ok(Json(department.into()))
}
