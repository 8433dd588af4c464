//! Authentication service - registration, login and token verification.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{RoleName, TOKEN_TYPE_BEARER};

use crate::credentials::{Claims, Credentials};
use crate::dto::{CreateAccountRequest, LoginRequest, RegisterRequest, TokenResponse};
use crate::repository::{AccountField, AccountRepository};
use crate::service::AccountService;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a `User`-role account and return its id
    async fn register(&self, request: RegisterRequest) -> AppResult<Uuid>;

    /// Exchange email and password for a bearer token
    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

pub struct Authenticator {
    accounts: Arc<dyn AccountService>,
    repo: Arc<dyn AccountRepository>,
    credentials: Arc<Credentials>,
}

impl Authenticator {
    pub fn new(
        accounts: Arc<dyn AccountService>,
        repo: Arc<dyn AccountRepository>,
        credentials: Arc<Credentials>,
    ) -> Self {
        Self {
            accounts,
            repo,
            credentials,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, request: RegisterRequest) -> AppResult<Uuid> {
        request.validate()?;

        self.accounts
            .create(CreateAccountRequest {
                name: request.name,
                email: request.email,
                password: request.password,
                role_id: RoleName::User.id(),
            })
            .await
    }

    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let account = self
            .repo
            .get_by_field(AccountField::Email(email), false)
            .await?
            .ok_or(AppError::EmailNotFound)?;

        if !self
            .credentials
            .verify_password(&request.password, &account.password_hash)
        {
            tracing::debug!(account_id = %account.id, "Password mismatch");
            return Err(AppError::CredentialsNotMatch);
        }

        let issued = self.credentials.issue_token(account.id, account.role.name)?;
        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(TokenResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: issued.expires_in,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.credentials.verify_token(token)
    }
}
