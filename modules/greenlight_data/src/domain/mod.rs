pub mod error;
pub mod filters;
pub mod movies;
pub mod repo;
pub mod service;
pub mod users;
pub mod validator;
