use async_trait::async_trait;

use crate::contract::model::{Metadata, Movie, User};
use crate::domain::error::DomainError;
use crate::domain::filters::Filters;

/// Port for movie persistence.
///
/// Writes take the entity by `&mut` and fill in the store-assigned fields
/// (`id`, `created_at`, `version`).
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    async fn insert(&self, movie: &mut Movie) -> Result<(), DomainError>;

    /// `NotFound` for ids below 1 or absent rows.
    async fn get(&self, id: i64) -> Result<Movie, DomainError>;

    /// Succeeds only if the stored version still equals `movie.version`;
    /// otherwise `EditConflict` and nothing is written.
    async fn update(&self, movie: &mut Movie) -> Result<(), DomainError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    async fn list(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), DomainError>;
}

/// Port for user persistence. Same version contract as movies.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: &mut User) -> Result<(), DomainError>;

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    async fn update(&self, user: &mut User) -> Result<(), DomainError>;
}
