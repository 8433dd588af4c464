use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::Employee;

use crate::dto::{CreateEmployeeRequest, EmployeeListParams, UpdateEmployeeRequest};
use crate::repository::{DepartmentRepository, EmployeeRepository};

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn create(&self, request: CreateEmployeeRequest) -> AppResult<Employee>;

    async fn list(&self, params: EmployeeListParams) -> AppResult<Vec<Employee>>;

    /// Partial update addressed by identity number
    async fn update(&self, identity_number: &str, request: UpdateEmployeeRequest)
        -> AppResult<Employee>;

    async fn delete(&self, identity_number: &str) -> AppResult<()>;
}

pub struct EmployeeManager {
    repo: Arc<dyn EmployeeRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl EmployeeManager {
    pub fn new(repo: Arc<dyn EmployeeRepository>, departments: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo, departments }
    }

    async fn ensure_department(&self, department_id: i32) -> AppResult<()> {
        match self.departments.find_by_id(department_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::field("departmentId", "Department does not exist")),
        }
    }

    async fn ensure_identity_free(&self, identity_number: &str) -> AppResult<()> {
        match self.repo.find_by_identity_number(identity_number).await? {
            Some(_) => Err(AppError::conflict("Employee")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn create(&self, request: CreateEmployeeRequest) -> AppResult<Employee> {
        request.validate()?;
        let employee = request.into_new_employee()?;

        self.ensure_department(employee.department_id).await?;
        self.ensure_identity_free(&employee.identity_number).await?;

        self.repo.create(employee).await
    }

    async fn list(&self, params: EmployeeListParams) -> AppResult<Vec<Employee>> {
        params.validate()?;
        self.repo.list(&params.into_filter()?).await
    }

    async fn update(
        &self,
        identity_number: &str,
        request: UpdateEmployeeRequest,
    ) -> AppResult<Employee> {
        request.validate()?;
        let changes = request.into_changes()?;

        let mut employee = self
            .repo
            .find_by_identity_number(identity_number)
            .await?
            .ok_or_not_found("Employee")?;

        if let Some(department_id) = changes.department_id {
            if department_id != employee.department_id {
                self.ensure_department(department_id).await?;
            }
        }
        if let Some(new_identity) = changes.identity_number.as_deref() {
            if new_identity != employee.identity_number {
                self.ensure_identity_free(new_identity).await?;
            }
        }

        employee.apply(changes);
        self.repo.update(employee).await
    }

    async fn delete(&self, identity_number: &str) -> AppResult<()> {
        self.repo.delete(identity_number).await
    }
}
