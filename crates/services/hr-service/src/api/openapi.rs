//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::file_handler::{UploadForm, UploadResponse};
use crate::api::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::dto::{
    AccountEnvelope, AccountListResponse, CreateAccountRequest, CreateDepartmentRequest,
    CreateEmployeeRequest, IdResponse, LoginRequest, RegisterRequest, TokenResponse,
    UpdateAccountRequest, UpdateDepartmentRequest, UpdateEmployeeRequest, UpdateProfileRequest,
};
use domain::{
    AccountResponse, AccountStats, DepartmentResponse, EmployeeResponse, Gender, ProfileResponse,
    Role, RoleName,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health_handler::health_check,
        crate::api::handlers::auth_handler::register,
        crate::api::handlers::auth_handler::login,
        crate::api::handlers::user_handler::get_current_user,
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::get_stats,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::user_handler::soft_delete_user,
        crate::api::handlers::user_handler::restore_user,
        crate::api::handlers::user_handler::hard_delete_user,
        crate::api::handlers::department_handler::create_department,
        crate::api::handlers::department_handler::list_departments,
        crate::api::handlers::department_handler::update_department,
        crate::api::handlers::department_handler::delete_department,
        crate::api::handlers::employee_handler::create_employee,
        crate::api::handlers::employee_handler::list_employees,
        crate::api::handlers::employee_handler::update_employee,
        crate::api::handlers::employee_handler::delete_employee,
        crate::api::handlers::file_handler::upload_file,
        crate::api::handlers::profile_handler::get_profile,
        crate::api::handlers::profile_handler::update_profile,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            IdResponse,
            RoleName,
            Role,
            AccountResponse,
            AccountEnvelope,
            AccountListResponse,
            AccountStats,
            CreateAccountRequest,
            UpdateAccountRequest,
            DepartmentResponse,
            CreateDepartmentRequest,
            UpdateDepartmentRequest,
            Gender,
            EmployeeResponse,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            UploadForm,
            UploadResponse,
            ProfileResponse,
            UpdateProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Dependency health"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Account management"),
        (name = "Departments", description = "Department management"),
        (name = "Employees", description = "Employee records"),
        (name = "Files", description = "Image uploads"),
        (name = "Profile", description = "The caller's own profile"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
