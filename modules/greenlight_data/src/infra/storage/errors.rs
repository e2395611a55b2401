//! Translation of sqlx failures into domain errors.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::error::DomainError;

/// Unique constraint guarding `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

pub fn classify(err: sqlx::Error, op: &'static str) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_KEY) {
            return DomainError::DuplicateEmail;
        }
    }
    match err {
        sqlx::Error::RowNotFound => DomainError::NotFound,
        other => DomainError::database(format!("{op}: {other}")),
    }
}

/// Run a store call under `timeout`. Expiry is reported as a database error.
pub async fn with_deadline<T, F>(timeout: Duration, op: &'static str, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res.map_err(|e| classify(e, op)),
        Err(_) => {
            warn!(op, ?timeout, "Store call exceeded its deadline");
            Err(DomainError::database(format!("{op}: timed out after {timeout:?}")))
        }
    }
}
