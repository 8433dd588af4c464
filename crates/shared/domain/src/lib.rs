//! Domain layer - Core business entities and value objects.
//!
//! Pure domain logic with no infrastructure dependencies: accounts and their
//! roles, departments, employees, listing queries and password hashing.

pub mod account;
pub mod constants;
pub mod department;
pub mod employee;
pub mod error;
pub mod password;
pub mod query;
pub mod role;

pub use account::{
    Account, AccountChanges, AccountResponse, AccountStats, AccountStatus, NewAccount, Profile,
    ProfileChanges, ProfileResponse,
};
pub use constants::*;
pub use department::{Department, DepartmentResponse, NewDepartment};
pub use employee::{Employee, EmployeeChanges, EmployeeResponse, Gender, NewEmployee};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use query::{
    escape_like, AccountFilter, AccountQuery, AccountSortField, DepartmentFilter, EmployeeFilter,
    SortOrder,
};
pub use role::{Role, RoleName};
