use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::contract::model::{Metadata, Movie};
use crate::domain::error::DomainError;
use crate::domain::filters::Filters;
use crate::domain::repo::MoviesRepository;
use crate::infra::storage::entity::{InsertedRow, MovieListRow, MovieRow};
use crate::infra::storage::errors::with_deadline;

/// Movie store backed by the `movies` table.
#[derive(Clone)]
pub struct PgMoviesRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgMoviesRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Listing SQL for an allow-listed `column` and direction.
fn list_sql(column: &'static str, direction: &'static str) -> String {
    format!(
        "SELECT count(*) OVER() AS total_records, id, created_at, title, year, runtime, genres, version \
         FROM movies \
         WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
         AND (genres @> $2 OR $2 = '{{}}') \
         ORDER BY {column} {direction}, id ASC \
         LIMIT $3 OFFSET $4"
    )
}

#[async_trait]
impl MoviesRepository for PgMoviesRepository {
    async fn insert(&self, movie: &mut Movie) -> Result<(), DomainError> {
        let query = sqlx::query_as::<_, InsertedRow>(
            "INSERT INTO movies (title, year, runtime, genres) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, created_at, version",
        )
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.runtime.minutes())
        .bind(&movie.genres)
        .fetch_one(&self.pool);

        let row = with_deadline(self.timeout, "insert movie", query).await?;
        movie.id = row.id;
        movie.created_at = row.created_at;
        movie.version = row.version;
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Movie, DomainError> {
        if id < 1 {
            return Err(DomainError::NotFound);
        }

        let query = sqlx::query_as::<_, MovieRow>(
            "SELECT id, created_at, title, year, runtime, genres, version \
             FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool);

        with_deadline(self.timeout, "get movie", query)
            .await?
            .map(Movie::from)
            .ok_or(DomainError::NotFound)
    }

    async fn update(&self, movie: &mut Movie) -> Result<(), DomainError> {
        let query = sqlx::query_scalar::<_, i32>(
            "UPDATE movies \
             SET title = $1, year = $2, runtime = $3, genres = $4, version = version + 1 \
             WHERE id = $5 AND version = $6 \
             RETURNING version",
        )
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.runtime.minutes())
        .bind(&movie.genres)
        .bind(movie.id)
        .bind(movie.version)
        .fetch_optional(&self.pool);

        match with_deadline(self.timeout, "update movie", query).await? {
            Some(version) => {
                movie.version = version;
                Ok(())
            }
            None => {
                debug!(movie_id = movie.id, version = movie.version, "Conditional update matched no row");
                Err(DomainError::EditConflict)
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        if id < 1 {
            return Ok(false);
        }

        let query = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = with_deadline(self.timeout, "delete movie", query).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), DomainError> {
        let sql = list_sql(filters.sort_column()?, filters.sort_direction().as_sql());

        let query = sqlx::query_as::<_, MovieListRow>(&sql)
            .bind(title)
            .bind(genres)
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(&self.pool);

        let rows = with_deadline(self.timeout, "list movies", query).await?;
        let total_records = rows.first().map_or(0, |r| r.total_records);
        let metadata = Metadata::calculate(total_records, filters.page, filters.page_size);
        let movies = rows.into_iter().map(|r| Movie::from(r.movie)).collect();
        Ok((movies, metadata))
    }
}
