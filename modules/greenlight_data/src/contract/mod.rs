pub mod error;
pub mod model;

pub use error::GreenlightError;
pub use model::{Metadata, Movie, MoviePatch, NewMovie, NewUser, Password, Runtime, User, UserPatch};
