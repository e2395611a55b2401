use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use zeroize::Zeroizing;

use crate::config::{GreenlightDataConfig, PasswordHashing};
use crate::contract::model::{Metadata, Movie, MoviePatch, NewMovie, NewUser, Password, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::filters::{validate_filters, MovieQuery};
use crate::domain::movies::validate_movie;
use crate::domain::repo::{MoviesRepository, UsersRepository};
use crate::domain::users::validate_user;
use crate::domain::validator::Validator;

/// Domain service for movies and users.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    movies: Arc<dyn MoviesRepository>,
    users: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: i64,
    pub max_edit_retries: u32,
    pub password_hashing: PasswordHashing,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&GreenlightDataConfig::default())
    }
}

impl From<&GreenlightDataConfig> for ServiceConfig {
    fn from(cfg: &GreenlightDataConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_edit_retries: cfg.max_edit_retries,
            password_hashing: cfg.password_hashing,
        }
    }
}

impl Service {
    pub fn new(
        movies: Arc<dyn MoviesRepository>,
        users: Arc<dyn UsersRepository>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            movies,
            users,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[instrument(
        name = "greenlight_data.service.create_movie",
        skip(self, new_movie),
        fields(title = %new_movie.title)
    )]
    pub async fn create_movie(&self, new_movie: NewMovie) -> Result<Movie, DomainError> {
        info!("Creating new movie");

        let mut movie = Movie::from(new_movie);
        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        v.into_result()?;

        self.movies.insert(&mut movie).await?;

        info!(movie_id = movie.id, "Successfully created movie");
        Ok(movie)
    }

    #[instrument(name = "greenlight_data.service.get_movie", skip(self), fields(movie_id = id))]
    pub async fn get_movie(&self, id: i64) -> Result<Movie, DomainError> {
        debug!("Getting movie by id");
        let movie = self.movies.get(id).await?;
        debug!("Successfully retrieved movie");
        Ok(movie)
    }

    /// Apply `patch` to the stored movie.
    ///
    /// With `expected_version` pinned, a mismatch fails immediately with
    /// `EditConflict`. Without it, a conflicting concurrent write triggers a
    /// re-fetch and re-apply, up to `max_edit_retries` times.
    #[instrument(
        name = "greenlight_data.service.update_movie",
        skip(self, patch),
        fields(movie_id = id)
    )]
    pub async fn update_movie(
        &self,
        id: i64,
        expected_version: Option<i32>,
        patch: MoviePatch,
    ) -> Result<Movie, DomainError> {
        info!("Updating movie");

        let mut attempt = 0u32;
        loop {
            let mut movie = self.movies.get(id).await?;
            if let Some(expected) = expected_version {
                if movie.version != expected {
                    debug!(stored_version = movie.version, "Stale version supplied");
                    return Err(DomainError::EditConflict);
                }
            }

            movie.apply(&patch);
            let mut v = Validator::new();
            validate_movie(&mut v, &movie);
            v.into_result()?;

            match self.movies.update(&mut movie).await {
                Ok(()) => {
                    info!(version = movie.version, "Successfully updated movie");
                    return Ok(movie);
                }
                Err(DomainError::EditConflict)
                    if expected_version.is_none() && attempt < self.config.max_edit_retries =>
                {
                    attempt += 1;
                    warn!(attempt, "Edit conflict, re-fetching movie");
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[instrument(name = "greenlight_data.service.delete_movie", skip(self), fields(movie_id = id))]
    pub async fn delete_movie(&self, id: i64) -> Result<(), DomainError> {
        info!("Deleting movie");
        if !self.movies.delete(id).await? {
            return Err(DomainError::NotFound);
        }
        info!("Successfully deleted movie");
        Ok(())
    }

    #[instrument(
        name = "greenlight_data.service.list_movies",
        skip(self, query),
        fields(title = %query.title, page = query.filters.page, page_size = query.filters.page_size)
    )]
    pub async fn list_movies(&self, query: MovieQuery) -> Result<(Vec<Movie>, Metadata), DomainError> {
        debug!("Listing movies");

        let mut v = Validator::new();
        validate_filters(&mut v, &query.filters);
        v.into_result()?;

        let (movies, metadata) = self
            .movies
            .list(&query.title, &query.genres, &query.filters)
            .await?;

        debug!(
            "Successfully listed {} movies of {}",
            movies.len(),
            metadata.total_records
        );
        Ok((movies, metadata))
    }

    #[instrument(
        name = "greenlight_data.service.register_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering new user");

        let mut user = User {
            name: new_user.name,
            email: new_user.email,
            password: self.hash_password(new_user.password).await?,
            activated: false,
            ..Default::default()
        };

        let mut v = Validator::new();
        validate_user(&mut v, &user);
        v.into_result()?;

        self.users.insert(&mut user).await?;
        user.password.clear_plaintext();

        info!(user_id = user.id, "Successfully registered user");
        Ok(user)
    }

    #[instrument(name = "greenlight_data.service.get_user_by_email", skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        debug!("Getting user by email");
        self.users.get_by_email(email).await
    }

    #[instrument(name = "greenlight_data.service.update_user", skip(self, patch))]
    pub async fn update_user(&self, email: &str, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let mut user = self.users.get_by_email(email).await?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(new_email) = patch.email {
            user.email = new_email;
        }
        if let Some(activated) = patch.activated {
            user.activated = activated;
        }
        if let Some(password) = patch.password {
            user.password = self.hash_password(password).await?;
        }

        let mut v = Validator::new();
        validate_user(&mut v, &user);
        v.into_result()?;

        self.users.update(&mut user).await?;
        user.password.clear_plaintext();

        info!(user_id = user.id, version = user.version, "Successfully updated user");
        Ok(user)
    }

    /// The user owning `email` if `password` matches, `None` otherwise.
    #[instrument(name = "greenlight_data.service.authenticate", skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DomainError> {
        let user = match self.users.get_by_email(email).await {
            Ok(user) => user,
            Err(DomainError::NotFound) => {
                debug!("No user for email");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let stored = user.password.clone();
        let candidate = Zeroizing::new(password.to_string());
        let ok = tokio::task::spawn_blocking(move || stored.matches(&candidate))
            .await
            .map_err(|e| DomainError::hashing(e.to_string()))??;

        if ok {
            debug!(user_id = user.id, "Credentials accepted");
            Ok(Some(user))
        } else {
            debug!(user_id = user.id, "Credentials rejected");
            Ok(None)
        }
    }

    /// Argon2 is CPU bound; keep it off the async workers.
    async fn hash_password(&self, plaintext: String) -> Result<Password, DomainError> {
        let params = self.config.password_hashing;
        let plaintext = Zeroizing::new(plaintext);
        tokio::task::spawn_blocking(move || {
            let mut password = Password::default();
            password.set(&plaintext, &params).map(|()| password)
        })
        .await
        .map_err(|e| DomainError::hashing(e.to_string()))?
    }
}
