use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Department, DepartmentFilter, NewDepartment};

use crate::dto::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest};
use crate::repository::DepartmentRepository;

#[async_trait]
pub trait DepartmentService: Send + Sync {
    /// The caller becomes the department manager
    async fn create(&self, manager_id: Uuid, request: CreateDepartmentRequest)
        -> AppResult<Department>;

    async fn list(&self, params: DepartmentListParams) -> AppResult<Vec<Department>>;

    async fn update(&self, id: i32, request: UpdateDepartmentRequest) -> AppResult<Department>;

    async fn delete(&self, id: i32) -> AppResult<Department>;
}

pub struct DepartmentManager {
    repo: Arc<dyn DepartmentRepository>,
}

impl DepartmentManager {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DepartmentService for DepartmentManager {
    async fn create(
        &self,
        manager_id: Uuid,
        request: CreateDepartmentRequest,
    ) -> AppResult<Department> {
        request.validate()?;

        let department = self
            .repo
            .create(NewDepartment {
                name: request.name,
                manager_id,
            })
            .await?;

        tracing::info!(department_id = department.id, %manager_id, "Department created");
        Ok(department)
    }

    async fn list(&self, params: DepartmentListParams) -> AppResult<Vec<Department>> {
        params.validate()?;
        self.repo.list(&DepartmentFilter::from(params)).await
    }

    async fn update(&self, id: i32, request: UpdateDepartmentRequest) -> AppResult<Department> {
        request.validate()?;
        self.repo.rename(id, request.name).await
    }

    async fn delete(&self, id: i32) -> AppResult<Department> {
        let department = self.repo.delete(id).await?;
        tracing::info!(department_id = id, "Department deleted");
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::AppError;
    use mockall::predicate::eq;

    use crate::repository::MockDepartmentRepository;

    #[tokio::test]
    async fn test_create_sets_manager() {
        let manager_id = Uuid::now_v7();
        let mut repo = MockDepartmentRepository::new();
        repo.expect_create()
            .withf(move |new| new.manager_id == manager_id && new.name == "Engineering")
            .returning(|new| {
                Ok(Department {
                    id: 1,
                    name: new.name,
                    manager_id: new.manager_id,
                    created_at: Utc::now(),
                })
            });

        let department = DepartmentManager::new(Arc::new(repo))
            .create(
                manager_id,
                CreateDepartmentRequest {
                    name: "Engineering".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(department.id, 1);
    }

    #[tokio::test]
    async fn test_short_name_rejected() {
        let repo = MockDepartmentRepository::new();
        let result = DepartmentManager::new(Arc::new(repo))
            .create(
                Uuid::now_v7(),
                CreateDepartmentRequest {
                    name: "HR".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_default_limit() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_list()
            .withf(|filter| filter.limit == 5 && filter.offset == 0 && filter.name.is_none())
            .returning(|_| Ok(vec![]));

        let departments = DepartmentManager::new(Arc::new(repo))
            .list(DepartmentListParams::default())
            .await
            .unwrap();
        assert!(departments.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_delete()
            .with(eq(42))
            .returning(|_| Err(AppError::not_found("Department")));

        let result = DepartmentManager::new(Arc::new(repo)).delete(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
