use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::contract::model::User;
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{InsertedRow, UserRow};
use crate::infra::storage::errors::with_deadline;

/// User store backed by the `users` table.
#[derive(Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUsersRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn insert(&self, user: &mut User) -> Result<(), DomainError> {
        let query = sqlx::query_as::<_, InsertedRow>(
            "INSERT INTO users (name, email, password_hash, activated) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, created_at, version",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password.expect_hash())
        .bind(user.activated)
        .fetch_one(&self.pool);

        let row = with_deadline(self.timeout, "insert user", query).await?;
        user.id = row.id;
        user.created_at = row.created_at;
        user.version = row.version;
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let query = sqlx::query_as::<_, UserRow>(
            "SELECT id, created_at, name, email, password_hash, activated, version \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool);

        with_deadline(self.timeout, "get user by email", query)
            .await?
            .map(User::from)
            .ok_or(DomainError::NotFound)
    }

    async fn update(&self, user: &mut User) -> Result<(), DomainError> {
        let query = sqlx::query_scalar::<_, i32>(
            "UPDATE users \
             SET name = $1, email = $2, password_hash = $3, activated = $4, version = version + 1 \
             WHERE id = $5 AND version = $6 \
             RETURNING version",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password.expect_hash())
        .bind(user.activated)
        .bind(user.id)
        .bind(user.version)
        .fetch_optional(&self.pool);

        match with_deadline(self.timeout, "update user", query).await? {
            Some(version) => {
                user.version = version;
                Ok(())
            }
            None => {
                debug!(user_id = user.id, version = user.version, "Conditional update matched no row");
                Err(DomainError::EditConflict)
            }
        }
    }
}
