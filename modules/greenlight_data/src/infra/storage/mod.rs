//! PostgreSQL implementations of the repository ports.

pub mod entity;
pub mod errors;
pub mod movies_repo;
pub mod users_repo;

pub use movies_repo::PgMoviesRepository;
pub use users_repo::PgUsersRepository;
