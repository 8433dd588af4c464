//! Listing queries for accounts, departments and employees.

use crate::constants::{DEFAULT_LIST_LIMIT, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_QUERY_OFFSET};
use crate::employee::Gender;
use crate::error::DomainError;

/// Columns an account listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    Email,
    Id,
}

impl std::str::FromStr for AccountSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "id" => Ok(Self::Id),
            other => Err(DomainError::validation(
                "sort_by",
                format!("cannot sort by '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::validation(
                "order",
                format!("order must be 'asc' or 'desc', got '{}'", other),
            )),
        }
    }
}

/// Filters shared by account listing and counting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountFilter {
    pub include_deleted: bool,
    /// Case-insensitive substring matched against name or email
    pub search: Option<String>,
}

/// A resolved account listing request. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountQuery {
    pub filter: AccountFilter,
    pub limit: u64,
    pub page: u64,
    pub sort_by: AccountSortField,
    pub order: SortOrder,
}

impl Default for AccountQuery {
    fn default() -> Self {
        Self {
            filter: AccountFilter::default(),
            limit: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
            sort_by: AccountSortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl AccountQuery {
    /// Rows skipped before this page, capped at what the database can bind.
    pub fn offset(&self) -> u64 {
        self.limit
            .saturating_mul(self.page.saturating_sub(1))
            .min(MAX_QUERY_OFFSET)
    }
}

/// Department listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFilter {
    pub name: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

impl Default for DepartmentFilter {
    fn default() -> Self {
        Self {
            name: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Employee listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Prefix of the identity number
    pub identity_number: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub department_id: Option<i32>,
    pub limit: u64,
    pub offset: u64,
}

impl Default for EmployeeFilter {
    fn default() -> Self {
        Self {
            identity_number: None,
            name: None,
            gender: None,
            department_id: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside a LIKE pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
