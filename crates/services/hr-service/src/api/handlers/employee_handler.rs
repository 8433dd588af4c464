use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};

use common::AppResult;
use domain::EmployeeResponse;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::state::AppState;
use crate::dto::{CreateEmployeeRequest, EmployeeListParams, UpdateEmployeeRequest};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:identity_number",
            patch(update_employee).delete(delete_employee),
        )
}

#[utoipa::path(
    post,
    path = "/v1/employee",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error or unknown department"),
        (status = 409, description = "Identity number already exists")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state.employees.create(request).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

#[utoipa::path(
    get,
    path = "/v1/employee",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(EmployeeListParams),
    responses(
        (status = 200, description = "Matching employees", body = Vec<EmployeeResponse>),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<EmployeeListParams>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employees.list(params).await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

/// Partial update; absent fields keep their value
#[utoipa::path(
    patch,
    path = "/v1/employee/{identityNumber}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(
        ("identityNumber" = String, Path, description = "Employee identity number")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error or unknown department"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Identity number already exists")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(identity_number): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employees.update(&identity_number, request).await?;
    Ok(Json(employee.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/employee/{identityNumber}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(
        ("identityNumber" = String, Path, description = "Employee identity number")
    ),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(identity_number): Path<String>,
) -> AppResult<StatusCode> {
    state.employees.delete(&identity_number).await?;
    Ok(StatusCode::OK)
}
