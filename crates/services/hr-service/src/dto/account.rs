use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::rules::{printable_ascii, sort_order, sortable_field};
use common::AppResult;
use domain::{
    AccountFilter, AccountQuery, AccountResponse, AccountSortField, SortOrder, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, MAX_PAGE,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "Alice Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(
        length(min = 8, max = 100, message = "Password must be 8-100 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "password123")]
    pub password: String,
    /// 1 Superadmin, 2 Lead Admin, 3 Admin, 4 User
    #[validate(range(min = 1, message = "role_id must be a positive integer"))]
    #[schema(example = 4)]
    pub role_id: i32,
}

/// Full replacement of name, email and password.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "printable_ascii")
    )]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        length(min = 8, max = 100, message = "Password must be 8-100 characters"),
        custom(function = "printable_ascii")
    )]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAccountsParams {
    /// Page size, 1-100 (default 10)
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    /// 1-based page number
    #[validate(range(min = 1, max = MAX_PAGE, message = "page must be between 1 and 10000000"))]
    pub page: Option<u64>,
    /// One of created_at, updated_at, name, email, id
    #[validate(custom(function = "sortable_field"))]
    pub sort_by: Option<String>,
    /// asc or desc
    #[validate(custom(function = "sort_order"))]
    pub order: Option<String>,
    pub include_deleted: Option<bool>,
    /// Case-insensitive substring of name or email
    pub search: Option<String>,
}

impl ListAccountsParams {
    /// Resolve defaults. Call after `validate()`.
    pub fn into_query(self) -> AppResult<AccountQuery> {
        let sort_by = match self.sort_by.as_deref() {
            Some(field) => field.parse()?,
            None => AccountSortField::default(),
        };
        let order = match self.order.as_deref() {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        Ok(AccountQuery {
            filter: AccountFilter {
                include_deleted: self.include_deleted.unwrap_or(false),
                search: self.search,
            },
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            page: self.page.unwrap_or(DEFAULT_PAGE),
            sort_by,
            order,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsParams {
    /// Restrict both counts to accounts matching this search term
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountEnvelope {
    pub user: AccountResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountListResponse {
    pub users: Vec<AccountResponse>,
}
