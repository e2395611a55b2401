#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use greenlight_data::config::PasswordHashing;
use greenlight_data::contract::model::{Metadata, Movie, NewMovie, Runtime, User};
use greenlight_data::domain::error::DomainError;
use greenlight_data::domain::filters::{Filters, SortDirection};
use greenlight_data::domain::repo::{MoviesRepository, UsersRepository};
use greenlight_data::domain::service::{Service, ServiceConfig};

#[cfg(feature = "integration")]
pub mod pg;

/// Argon2 parameters cheap enough for tests.
pub fn cheap_hashing() -> PasswordHashing {
    PasswordHashing {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        password_hashing: cheap_hashing(),
        ..ServiceConfig::default()
    }
}

pub fn service_with(movies: Arc<InMemoryMovies>, users: Arc<InMemoryUsers>) -> Service {
    Service::new(movies, users, test_config())
}

pub fn new_movie(title: &str, year: i32, runtime: i32, genres: &[&str]) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year,
        runtime: Runtime(runtime),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

/// Compare-and-swap movie store mirroring the SQL gateway's contract.
#[derive(Default)]
pub struct InMemoryMovies {
    rows: Mutex<BTreeMap<i64, Movie>>,
    next_id: Mutex<i64>,
    /// Pending simulated concurrent writers: each one bumps the stored version
    /// right before the next update lands.
    injected_conflicts: AtomicU32,
    update_calls: AtomicU32,
}

impl InMemoryMovies {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inject_conflicts(&self, n: u32) {
        self.injected_conflicts.store(n, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: i64) -> Option<Movie> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

fn title_matches(title: &str, query: &str) -> bool {
    let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
    query
        .split_whitespace()
        .all(|q| words.contains(&q.to_lowercase()))
}

#[async_trait]
impl MoviesRepository for InMemoryMovies {
    async fn insert(&self, movie: &mut Movie) -> Result<(), DomainError> {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        movie.id = *next;
        movie.created_at = Utc::now();
        movie.version = 1;
        self.rows.lock().unwrap().insert(movie.id, movie.clone());
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Movie, DomainError> {
        if id < 1 {
            return Err(DomainError::NotFound);
        }
        self.stored(id).ok_or(DomainError::NotFound)
    }

    async fn update(&self, movie: &mut Movie) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let stored = rows.get_mut(&movie.id).ok_or(DomainError::EditConflict)?;

        let pending = self.injected_conflicts.load(Ordering::SeqCst);
        if pending > 0 {
            self.injected_conflicts.store(pending - 1, Ordering::SeqCst);
            stored.version += 1;
        }

        if stored.version != movie.version {
            return Err(DomainError::EditConflict);
        }
        movie.version += 1;
        *stored = movie.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), DomainError> {
        let column = filters.sort_column()?;
        let mut matched: Vec<Movie> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|m| title.is_empty() || title_matches(&m.title, title))
            .filter(|m| genres.iter().all(|g| m.genres.contains(g)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let primary = match column {
                "title" => a.title.cmp(&b.title),
                "year" => a.year.cmp(&b.year),
                "runtime" => a.runtime.cmp(&b.runtime),
                _ => a.id.cmp(&b.id),
            };
            let primary = match filters.sort_direction() {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then(a.id.cmp(&b.id))
        });

        let total = matched.len() as i64;
        let page: Vec<Movie> = matched
            .into_iter()
            .skip(filters.offset() as usize)
            .take(filters.limit() as usize)
            .collect();
        let metadata = if page.is_empty() {
            Metadata::default()
        } else {
            Metadata::calculate(total, filters.page, filters.page_size)
        };
        Ok((page, metadata))
    }
}

/// User store enforcing unique emails and version checks.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsers {
    async fn insert(&self, user: &mut User) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        user.id = rows.len() as i64 + 1;
        user.created_at = Utc::now();
        user.version = 1;
        let mut stored = user.clone();
        stored.password.clear_plaintext();
        rows.push(stored);
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn update(&self, user: &mut User) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(DomainError::DuplicateEmail);
        }
        let stored = rows
            .iter_mut()
            .find(|u| u.id == user.id && u.version == user.version)
            .ok_or(DomainError::EditConflict)?;
        user.version += 1;
        *stored = user.clone();
        stored.password.clear_plaintext();
        Ok(())
    }
}
