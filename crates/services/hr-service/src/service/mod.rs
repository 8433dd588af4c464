//! Service layer - business logic behind the HTTP handlers.

pub mod account_service;
pub mod auth_service;
pub mod department_service;
pub mod employee_service;
pub mod file_service;

pub use account_service::{AccountManager, AccountService};
pub use auth_service::{AuthService, Authenticator};
pub use department_service::{DepartmentManager, DepartmentService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use file_service::{FileService, UploadedFile, Uploader};
