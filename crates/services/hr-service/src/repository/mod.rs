//! Repository layer - data access abstraction.

pub mod account_repository;
pub mod department_repository;
pub mod employee_repository;
pub mod entities;

pub use account_repository::{AccountField, AccountRepository, AccountStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use department_repository::MockDepartmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
