//! Explicit begin/commit/rollback around a unit of work.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};

use common::{AppResult, StorageContext};

/// Run `f` inside a read-committed transaction.
///
/// Commits when `f` succeeds. Any error from `f` rolls the transaction back
/// and is returned unchanged; a failed rollback is only logged.
pub async fn with_transaction<F, T>(
    db: &DatabaseConnection,
    operation: &'static str,
    f: F,
) -> AppResult<T>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'c>>
        + Send,
    T: Send,
{
    let txn = db
        .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
        .await
        .context(operation)?;

    match f(&txn).await {
        Ok(value) => {
            txn.commit().await.context(operation)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(operation, "Transaction rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
