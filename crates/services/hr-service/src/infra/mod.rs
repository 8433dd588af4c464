//! Infrastructure layer: database, migrations, transactions and object storage.

pub mod db;
pub mod migrations;
pub mod storage;
pub mod transaction;

pub use db::Database;
pub use migrations::Migrator;
pub use storage::{ObjectStorage, S3Storage, StoredObject};
pub use transaction::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockObjectStorage;
