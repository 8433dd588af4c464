//! Request and response bodies.
//!
//! Every request type derives `Validate`; services call `validate()` before
//! touching a repository, whichever entry point built the request.

pub mod account;
pub mod auth;
pub mod department;
pub mod employee;
pub mod profile;
mod rules;

pub use account::{
    AccountEnvelope, AccountListResponse, CreateAccountRequest, IdResponse, ListAccountsParams,
    StatsParams, UpdateAccountRequest,
};
pub use auth::{LoginRequest, RegisterRequest, TokenResponse};
pub use department::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest};
pub use employee::{CreateEmployeeRequest, EmployeeListParams, UpdateEmployeeRequest};
pub use profile::UpdateProfileRequest;
