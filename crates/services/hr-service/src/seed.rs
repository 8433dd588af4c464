//! Bulk account import from a header-less CSV file.
//!
//! Each row is `name,email,password,role_id` and goes through the same
//! validation and service path as `POST /users`.

use std::io::Read;

use validator::Validate;

use common::{AppError, AppResult};

use crate::dto::CreateAccountRequest;
use crate::service::AccountService;

/// Parse and validate every row, stopping at the first bad one.
pub fn parse_accounts<R: Read>(reader: R) -> AppResult<Vec<CreateAccountRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<CreateAccountRequest>().enumerate() {
        let line = index + 1;
        let request =
            record.map_err(|e| AppError::bad_request(format!("Row {}: {}", line, e)))?;

        if let Err(e) = request.validate() {
            tracing::warn!(line, "Seed row failed validation");
            return Err(e.into());
        }

        rows.push(request);
    }

    Ok(rows)
}

/// Create every account in order. Returns how many were inserted.
pub async fn seed_accounts(
    accounts: &dyn AccountService,
    rows: Vec<CreateAccountRequest>,
) -> AppResult<usize> {
    let mut created = 0;
    for request in rows {
        let email = request.email.clone();
        let id = accounts.create(request).await.inspect_err(|e| {
            tracing::error!(%email, error = %e, "Seeding stopped");
        })?;
        tracing::debug!(%id, %email, "Seeded account");
        created += 1;
    }
    Ok(created)
}
