use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::contract::model::{Movie, Password, Runtime, User};

#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: i32,
    pub genres: Vec<String>,
    pub version: i32,
}

/// A listing row: the movie plus the window count of all matches.
#[derive(Debug, Clone, FromRow)]
pub struct MovieListRow {
    pub total_records: i64,
    #[sqlx(flatten)]
    pub movie: MovieRow,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub activated: bool,
    pub version: i32,
}

/// Columns the store fills in on insert.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct InsertedRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub version: i32,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            title: row.title,
            year: row.year,
            runtime: Runtime(row.runtime),
            genres: row.genres,
            version: row.version,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            name: row.name,
            email: row.email,
            password: Password::from_hash(row.password_hash),
            activated: row.activated,
            version: row.version,
        }
    }
}
