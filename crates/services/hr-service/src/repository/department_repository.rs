use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::department;
use common::{violation, AppError, AppResult, OptionExt, StorageContext, Violation};
use domain::{escape_like, Department, DepartmentFilter, NewDepartment};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, department: NewDepartment) -> AppResult<Department>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>>;

    /// Name filter is a case-insensitive substring match
    async fn list(&self, filter: &DepartmentFilter) -> AppResult<Vec<Department>>;

    async fn rename(&self, id: i32, name: String) -> AppResult<Department>;

    /// Fails with `InUse` while employees still reference the department
    async fn delete(&self, id: i32) -> AppResult<Department>;
}

pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> AppResult<department::Model> {
        department::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find department")?
            .ok_or_not_found("Department")
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn create(&self, department: NewDepartment) -> AppResult<Department> {
        let model = department::ActiveModel {
            name: Set(department.name),
            manager_id: Set(department.manager_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create department")?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>> {
        let model = department::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find department")?;
        Ok(model.map(Department::from))
    }

    async fn list(&self, filter: &DepartmentFilter) -> AppResult<Vec<Department>> {
        let mut query = department::Entity::find();

        if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(department::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let models = query
            .order_by_asc(department::Column::Name)
            .order_by_asc(department::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .context("list departments")?;

        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn rename(&self, id: i32, name: String) -> AppResult<Department> {
        let mut active: department::ActiveModel = self.load(id).await?.into();
        active.name = Set(name);

        let model = active.update(&self.db).await.context("rename department")?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> AppResult<Department> {
        let existing = self.load(id).await?;

        let result = department::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| match violation(&err) {
                Some(Violation::ForeignKey) => AppError::InUse("Department".to_string()),
                _ => AppError::Storage {
                    context: "delete department",
                    source: err,
                },
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Department"));
        }

        Ok(existing.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};
    use uuid::Uuid;

    fn department_row(id: i32, name: &str) -> department::Model {
        department::Model {
            id,
            name: name.to_string(),
            manager_id: Uuid::now_v7(),
            created_at: Utc::now(),
        }
    }

    fn statements(db: DatabaseConnection) -> Vec<Statement> {
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().to_vec())
            .collect()
    }

    #[tokio::test]
    async fn test_list_filters_by_name_and_orders() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[department_row(2, "Engineering")]])
            .into_connection();

        let filter = DepartmentFilter {
            name: Some(" ENG ".to_string()),
            ..DepartmentFilter::default()
        };
        let departments = DepartmentStore::new(db.clone()).list(&filter).await.unwrap();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].name, "Engineering");

        let log = statements(db);
        let sql = &log[0].sql;
        assert!(sql.contains(r#"LOWER("departments"."name") LIKE"#));
        assert!(sql.contains(r#"ORDER BY "departments"."name" ASC, "departments"."id" ASC"#));

        let bound = log[0].values.as_ref().map(|v| v.0.clone()).unwrap_or_default();
        assert!(bound.contains(&Value::from("%eng%")));
        assert!(bound.contains(&Value::from(5u64)));
    }

    #[tokio::test]
    async fn test_delete_missing_department() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection();

        let err = DepartmentStore::new(db).delete(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_department() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[department_row(7, "Finance")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let removed = DepartmentStore::new(db.clone()).delete(7).await.unwrap();
        assert_eq!(removed.id, 7);
        assert_eq!(removed.name, "Finance");

        let log = statements(db);
        assert!(log[1].sql.starts_with(r#"DELETE FROM "departments""#));
    }
}
