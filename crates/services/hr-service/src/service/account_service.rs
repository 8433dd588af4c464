//! Account service - account lifecycle and listing.
//!
//! Lifecycle: Active -> SoftDeleted -> Active (restore), or any -> purged
//! (hard delete). Every request is validated before the repository is touched.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    Account, AccountChanges, AccountFilter, AccountStats, AccountStatus, NewAccount, ProfileChanges,
};

use crate::credentials::Credentials;
use crate::dto::{
    CreateAccountRequest, ListAccountsParams, UpdateAccountRequest, UpdateProfileRequest,
};
use crate::repository::{AccountField, AccountRepository};

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Defaults: 10 per page, page 1, `created_at desc`, soft-deleted excluded
    async fn list(&self, params: ListAccountsParams) -> AppResult<Vec<Account>>;

    /// Non-deleted account by id
    async fn get_by_id(&self, id: Uuid) -> AppResult<Account>;

    /// Total, non-deleted and deleted counts, optionally narrowed by a search term
    async fn get_stats(&self, search: Option<String>) -> AppResult<AccountStats>;

    async fn create(&self, request: CreateAccountRequest) -> AppResult<Uuid>;

    async fn update(&self, id: Uuid, request: UpdateAccountRequest) -> AppResult<Uuid>;

    /// Change only the profile fields present in the request
    async fn update_profile(&self, id: Uuid, request: UpdateProfileRequest) -> AppResult<Account>;

    async fn soft_delete(&self, id: Uuid) -> AppResult<Uuid>;

    async fn restore(&self, id: Uuid) -> AppResult<Uuid>;

    async fn hard_delete(&self, id: Uuid) -> AppResult<Uuid>;
}

pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    credentials: Arc<Credentials>,
}

impl AccountManager {
    pub fn new(repo: Arc<dyn AccountRepository>, credentials: Arc<Credentials>) -> Self {
        Self { repo, credentials }
    }

    async fn find_active(&self, id: Uuid) -> AppResult<Account> {
        self.repo
            .get_by_field(AccountField::Id(id), false)
            .await?
            .ok_or_not_found("Account")
    }

    async fn find_any(&self, id: Uuid) -> AppResult<Account> {
        self.repo
            .get_by_field(AccountField::Id(id), true)
            .await?
            .ok_or_not_found("Account")
    }

    /// Fails with `Conflict` when a non-deleted account other than `except` owns `email`.
    async fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> AppResult<()> {
        let owner = self
            .repo
            .get_by_field(AccountField::Email(email.to_string()), false)
            .await?;

        match owner {
            Some(owner) if Some(owner.id) != except => Err(AppError::conflict("Email")),
            _ => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AccountService for AccountManager {
    async fn list(&self, params: ListAccountsParams) -> AppResult<Vec<Account>> {
        params.validate()?;
        let query = params.into_query()?;
        self.repo.list(&query).await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Account> {
        self.find_active(id).await
    }

    async fn get_stats(&self, search: Option<String>) -> AppResult<AccountStats> {
        let all = AccountFilter {
            include_deleted: true,
            search: search.clone(),
        };
        let active = AccountFilter {
            include_deleted: false,
            search,
        };

        let (total, non_deleted) =
            tokio::try_join!(self.repo.count(&all), self.repo.count(&active))?;

        Ok(AccountStats::from_counts(total, non_deleted))
    }

    async fn create(&self, request: CreateAccountRequest) -> AppResult<Uuid> {
        request.validate()?;
        let email = normalize_email(&request.email);

        if !self.repo.role_exists(request.role_id).await? {
            return Err(AppError::field("role_id", "Role does not exist"));
        }
        self.ensure_email_free(&email, None).await?;

        let password_hash = self.credentials.hash_password(&request.password)?;
        let account = self
            .repo
            .create(NewAccount {
                id: Uuid::now_v7(),
                name: request.name,
                email,
                password_hash,
                role_id: request.role_id,
            })
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role.name, "Account created");
        Ok(account.id)
    }

    async fn update(&self, id: Uuid, request: UpdateAccountRequest) -> AppResult<Uuid> {
        request.validate()?;
        let email = normalize_email(&request.email);

        let existing = self.find_active(id).await?;
        if !existing.has_email(&email) {
            self.ensure_email_free(&email, Some(id)).await?;
        }

        let password_hash = self.credentials.hash_password(&request.password)?;
        let account = self
            .repo
            .update(
                id,
                AccountChanges {
                    name: request.name,
                    email,
                    password_hash,
                },
            )
            .await?;

        Ok(account.id)
    }

    async fn update_profile(&self, id: Uuid, request: UpdateProfileRequest) -> AppResult<Account> {
        request.validate()?;
        let mut changes = ProfileChanges::from(request);
        changes.email = changes.email.as_deref().map(normalize_email);

        let existing = self.find_active(id).await?;
        if let Some(email) = changes.email.as_deref() {
            if !existing.has_email(email) {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        if changes.is_empty() {
            return Ok(existing);
        }

        let account = self.repo.update_profile(id, changes).await?;
        tracing::info!(account_id = %id, "Profile updated");
        Ok(account)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Uuid> {
        self.find_active(id).await?;
        self.repo.soft_delete(id).await?;
        tracing::info!(account_id = %id, "Account soft-deleted");
        Ok(id)
    }

    async fn restore(&self, id: Uuid) -> AppResult<Uuid> {
        let account = self.find_any(id).await?;
        if account.status() != AccountStatus::SoftDeleted {
            return Err(AppError::not_found("Deleted account"));
        }

        self.repo.restore(id).await?;
        tracing::info!(account_id = %id, "Account restored");
        Ok(id)
    }

    async fn hard_delete(&self, id: Uuid) -> AppResult<Uuid> {
        self.find_any(id).await?;
        self.repo.hard_delete(id).await?;
        tracing::info!(account_id = %id, "Account permanently deleted");
        Ok(id)
    }
}
