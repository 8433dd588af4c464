//! Attaching operation context to sea-orm errors.

use sea_orm::{DbErr, SqlErr};

use crate::error::{AppError, AppResult};

/// Annotate a persistence failure with the operation that produced it.
pub trait StorageContext<T> {
    fn context(self, operation: &'static str) -> AppResult<T>;
}

impl<T> StorageContext<T> for Result<T, DbErr> {
    fn context(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::Storage {
            context: operation,
            source,
        })
    }
}

/// Constraint violations that callers turn into domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
}

/// Classify a database error as a constraint violation, if it is one.
pub fn violation(err: &DbErr) -> Option<Violation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(Violation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => Some(Violation::ForeignKey),
        _ => None,
    }
}
