//! Account repository with soft delete support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{role, user};
use crate::infra::with_transaction;
use common::{violation, AppError, AppResult, OptionExt, StorageContext, Violation};
use domain::{
    escape_like, Account, AccountChanges, AccountFilter, AccountQuery, AccountSortField,
    NewAccount, ProfileChanges, SortOrder,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Field an account can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountField {
    Id(Uuid),
    /// Matched case-insensitively
    Email(String),
}

/// Account repository trait for dependency injection.
///
/// Writes keyed by id return `AppError::NotFound` when no row matched.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up one account; soft-deleted rows only when `include_deleted`
    async fn get_by_field(&self, field: AccountField, include_deleted: bool)
        -> AppResult<Option<Account>>;

    /// Filtered, sorted, paginated listing
    async fn list(&self, query: &AccountQuery) -> AppResult<Vec<Account>>;

    /// Count accounts matching the filter
    async fn count(&self, filter: &AccountFilter) -> AppResult<u64>;

    /// Insert a new account
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Replace name, email and password of a non-deleted account
    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account>;

    /// Write only the provided profile fields of a non-deleted account
    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> AppResult<Account>;

    /// Set `deleted_at` on a non-deleted account
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;

    /// Clear `deleted_at` on a soft-deleted account
    async fn restore(&self, id: Uuid) -> AppResult<()>;

    /// Permanently remove the row. Fails with `InUse` while it manages a department.
    async fn hard_delete(&self, id: Uuid) -> AppResult<()>;

    async fn role_exists(&self, role_id: i32) -> AppResult<bool>;
}

/// SeaORM implementation of `AccountRepository`.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn lower(column: user::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((user::Entity, column))))
}

fn apply_filter<Q: QueryFilter>(query: Q, filter: &AccountFilter) -> Q {
    let query = if filter.include_deleted {
        query
    } else {
        query.filter(user::Column::DeletedAt.is_null())
    };

    match filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            query.filter(
                Condition::any()
                    .add(lower(user::Column::Name).like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(lower(user::Column::Email).like(LikeExpr::new(pattern).escape('\\'))),
            )
        }
        None => query,
    }
}

fn sort_column(field: AccountSortField) -> user::Column {
    match field {
        AccountSortField::CreatedAt => user::Column::CreatedAt,
        AccountSortField::UpdatedAt => user::Column::UpdatedAt,
        AccountSortField::Name => user::Column::Name,
        AccountSortField::Email => user::Column::Email,
        AccountSortField::Id => user::Column::Id,
    }
}

fn sort_order(order: SortOrder) -> sea_orm::Order {
    match order {
        SortOrder::Asc => sea_orm::Order::Asc,
        SortOrder::Desc => sea_orm::Order::Desc,
    }
}

/// Map write failures: a unique violation can only be the active-email index.
fn write_error(err: DbErr, operation: &'static str) -> AppError {
    match violation(&err) {
        Some(Violation::Unique) => AppError::conflict("Email"),
        Some(Violation::ForeignKey) => AppError::field("role_id", "Role does not exist"),
        None => AppError::Storage {
            context: operation,
            source: err,
        },
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn get_by_field(
        &self,
        field: AccountField,
        include_deleted: bool,
    ) -> AppResult<Option<Account>> {
        let query = user::Entity::find().find_also_related(role::Entity);
        let query = match field {
            AccountField::Id(id) => query.filter(user::Column::Id.eq(id)),
            AccountField::Email(email) => {
                query.filter(lower(user::Column::Email).eq(email.to_lowercase()))
            }
        };
        let query = if include_deleted {
            query
        } else {
            query.filter(user::Column::DeletedAt.is_null())
        };

        let row = query.one(&self.db).await.context("get account")?;
        row.map(|(model, role)| model.into_account(role)).transpose()
    }

    async fn list(&self, query: &AccountQuery) -> AppResult<Vec<Account>> {
        let order = sort_order(query.order);

        let rows = apply_filter(
            user::Entity::find().find_also_related(role::Entity),
            &query.filter,
        )
        .order_by(sort_column(query.sort_by), order.clone())
        .order_by(user::Column::Id, order)
        .offset(query.offset())
        .limit(query.limit)
        .all(&self.db)
        .await
        .context("list accounts")?;

        rows.into_iter()
            .map(|(model, role)| model.into_account(role))
            .collect()
    }

    async fn count(&self, filter: &AccountFilter) -> AppResult<u64> {
        apply_filter(user::Entity::find(), filter)
            .count(&self.db)
            .await
            .context("count accounts")
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        with_transaction(&self.db, "create account", |txn| {
            Box::pin(async move {
                let now = Utc::now();
                let model = user::ActiveModel {
                    id: Set(account.id),
                    name: Set(account.name),
                    email: Set(account.email),
                    password: Set(account.password_hash),
                    role_id: Set(account.role_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                    deleted_at: Set(None),
                    user_image_uri: Set(None),
                    company_name: Set(None),
                    company_image_uri: Set(None),
                }
                .insert(txn)
                .await
                .map_err(|e| write_error(e, "create account"))?;

                let role = role::Entity::find_by_id(model.role_id)
                    .one(txn)
                    .await
                    .context("load account role")?;
                model.into_account(role)
            })
        })
        .await
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account> {
        with_transaction(&self.db, "update account", |txn| {
            Box::pin(async move {
                let existing = user::Entity::find_by_id(id)
                    .filter(user::Column::DeletedAt.is_null())
                    .one(txn)
                    .await
                    .context("update account")?
                    .ok_or_not_found("Account")?;

                let mut active: user::ActiveModel = existing.into();
                active.name = Set(changes.name);
                active.email = Set(changes.email);
                active.password = Set(changes.password_hash);
                active.updated_at = Set(Utc::now());

                let model = active
                    .update(txn)
                    .await
                    .map_err(|e| write_error(e, "update account"))?;

                let role = role::Entity::find_by_id(model.role_id)
                    .one(txn)
                    .await
                    .context("load account role")?;
                model.into_account(role)
            })
        })
        .await
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> AppResult<Account> {
        with_transaction(&self.db, "update profile", |txn| {
            Box::pin(async move {
                let existing = user::Entity::find_by_id(id)
                    .filter(user::Column::DeletedAt.is_null())
                    .one(txn)
                    .await
                    .context("update profile")?
                    .ok_or_not_found("Account")?;

                let mut active: user::ActiveModel = existing.into();
                if let Some(name) = changes.name {
                    active.name = Set(name);
                }
                if let Some(email) = changes.email {
                    active.email = Set(email);
                }
                if let Some(uri) = changes.user_image_uri {
                    active.user_image_uri = Set(Some(uri));
                }
                if let Some(company) = changes.company_name {
                    active.company_name = Set(Some(company));
                }
                if let Some(uri) = changes.company_image_uri {
                    active.company_image_uri = Set(Some(uri));
                }
                active.updated_at = Set(Utc::now());

                let model = active
                    .update(txn)
                    .await
                    .map_err(|e| write_error(e, "update profile"))?;

                let role = role::Entity::find_by_id(model.role_id)
                    .one(txn)
                    .await
                    .context("load account role")?;
                model.into_account(role)
            })
        })
        .await
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let now = Utc::now();
        let result = user::Entity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(now))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete account")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Account"));
        }

        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(None::<DateTime<Utc>>))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "restore account"))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Account"));
        }

        Ok(())
    }

    async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| match violation(&err) {
                Some(Violation::ForeignKey) => AppError::InUse("Account".to_string()),
                _ => AppError::Storage {
                    context: "hard delete account",
                    source: err,
                },
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Account"));
        }

        Ok(())
    }

    async fn role_exists(&self, role_id: i32) -> AppResult<bool> {
        let count = role::Entity::find_by_id(role_id)
            .count(&self.db)
            .await
            .context("check role")?;
        Ok(count > 0)
    }
}
