use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::employee;
use common::{violation, AppError, AppResult, OptionExt, StorageContext, Violation};
use domain::{escape_like, Employee, EmployeeFilter, NewEmployee};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Duplicate identity numbers fail with `Conflict`
    async fn create(&self, employee: NewEmployee) -> AppResult<Employee>;

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<Employee>>;

    async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<Employee>>;

    /// Persist every mutable field of an existing employee, keyed by `id`
    async fn update(&self, employee: Employee) -> AppResult<Employee>;

    async fn delete(&self, identity_number: &str) -> AppResult<()>;
}

pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn write_error(err: DbErr, operation: &'static str) -> AppError {
    match violation(&err) {
        Some(Violation::Unique) => AppError::conflict("Employee"),
        Some(Violation::ForeignKey) => AppError::field("departmentId", "Department does not exist"),
        None => AppError::Storage {
            context: operation,
            source: err,
        },
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn create(&self, employee: NewEmployee) -> AppResult<Employee> {
        let model = employee::ActiveModel {
            identity_number: Set(employee.identity_number),
            name: Set(employee.name),
            employee_image_uri: Set(employee.employee_image_uri),
            gender: Set(employee.gender.as_str().to_string()),
            department_id: Set(employee.department_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, "create employee"))?;

        model.into_employee()
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<Employee>> {
        employee::Entity::find()
            .filter(employee::Column::IdentityNumber.eq(identity_number))
            .one(&self.db)
            .await
            .context("find employee")?
            .map(employee::Model::into_employee)
            .transpose()
    }

    async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<Employee>> {
        let mut query = employee::Entity::find();

        if let Some(prefix) = filter.identity_number.as_deref().filter(|p| !p.is_empty()) {
            let pattern = format!("{}%", escape_like(prefix));
            query = query.filter(
                Expr::col(employee::Column::IdentityNumber).like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(employee::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        if let Some(gender) = filter.gender {
            query = query.filter(employee::Column::Gender.eq(gender.as_str()));
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(employee::Column::DepartmentId.eq(department_id));
        }

        let models = query
            .order_by_asc(employee::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .context("list employees")?;

        models.into_iter().map(employee::Model::into_employee).collect()
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let existing = employee::Entity::find_by_id(employee.id)
            .one(&self.db)
            .await
            .context("update employee")?
            .ok_or_not_found("Employee")?;

        let mut active: employee::ActiveModel = existing.into();
        active.identity_number = Set(employee.identity_number);
        active.name = Set(employee.name);
        active.employee_image_uri = Set(employee.employee_image_uri);
        active.gender = Set(employee.gender.as_str().to_string());
        active.department_id = Set(employee.department_id);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update employee"))?;

        model.into_employee()
    }

    async fn delete(&self, identity_number: &str) -> AppResult<()> {
        let result = employee::Entity::delete_many()
            .filter(employee::Column::IdentityNumber.eq(identity_number))
            .exec(&self.db)
            .await
            .context("delete employee")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee"));
        }

        Ok(())
    }
}
