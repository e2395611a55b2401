use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Metadata, Movie, MoviePatch, NewMovie, NewUser, Runtime, User, UserPatch};

/// Public JSON form of a movie. `created_at` is internal and never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub year: i32,
    #[serde(default, skip_serializing_if = "Runtime::is_zero")]
    pub runtime: Runtime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    pub version: i32,
}

/// Public JSON form of a user. Password and version stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub activated: bool,
}

/// Envelope for a page of movies.
#[derive(Debug, Clone, Serialize)]
pub struct MovieListDto {
    pub movies: Vec<MovieDto>,
    pub metadata: Metadata,
}

/// Body of a create-movie request. Missing fields are left zero and caught by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateMovieReq {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateMovieReq {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterUserReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub activated: Option<bool>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

impl From<Movie> for MovieDto {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            runtime: m.runtime,
            genres: m.genres,
            version: m.version,
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            created_at: u.created_at,
            name: u.name,
            email: u.email,
            activated: u.activated,
        }
    }
}

impl MovieListDto {
    pub fn new(movies: Vec<Movie>, metadata: Metadata) -> Self {
        Self {
            movies: movies.into_iter().map(MovieDto::from).collect(),
            metadata,
        }
    }
}

impl From<CreateMovieReq> for NewMovie {
    fn from(req: CreateMovieReq) -> Self {
        Self {
            title: req.title,
            year: req.year,
            runtime: req.runtime,
            genres: req.genres,
        }
    }
}

impl From<UpdateMovieReq> for MoviePatch {
    fn from(req: UpdateMovieReq) -> Self {
        Self {
            title: req.title,
            year: req.year,
            runtime: req.runtime,
            genres: req.genres,
        }
    }
}

impl From<RegisterUserReq> for NewUser {
    fn from(req: RegisterUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            activated: req.activated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_json_shape() {
        let dto = MovieDto::from(Movie {
            id: 1,
            created_at: Utc::now(),
            title: "Casablanca".into(),
            year: 1942,
            runtime: Runtime(102),
            genres: vec!["drama".into(), "romance".into()],
            version: 1,
        });
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({
                "id": 1,
                "title": "Casablanca",
                "year": 1942,
                "runtime": "102",
                "genres": ["drama", "romance"],
                "version": 1
            })
        );
    }

    #[test]
    fn zero_movie_fields_are_omitted() {
        let dto = MovieDto::from(Movie {
            id: 2,
            title: "Untitled".into(),
            version: 1,
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "id": 2, "title": "Untitled", "version": 1 })
        );
    }

    #[test]
    fn user_json_hides_password_and_version() {
        let mut user = User {
            id: 9,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            version: 4,
            ..Default::default()
        };
        user.password = crate::contract::model::Password::from_hash("$argon2id$v=19$secret");
        let value = serde_json::to_value(UserDto::from(user)).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["activated", "created_at", "email", "id", "name"]);
        assert!(!value.to_string().contains("argon2id"));
    }

    #[test]
    fn create_request_accepts_either_runtime_form() {
        let a: CreateMovieReq = serde_json::from_value(json!({
            "title": "Moana", "year": 2016, "runtime": "107", "genres": ["animation"]
        }))
        .unwrap();
        let b: CreateMovieReq = serde_json::from_value(json!({
            "title": "Moana", "year": 2016, "runtime": 107, "genres": ["animation"]
        }))
        .unwrap();
        assert_eq!(a.runtime, Runtime(107));
        assert_eq!(a.runtime, b.runtime);
    }

    #[test]
    fn create_request_rejects_bad_runtime_and_unknown_fields() {
        assert!(serde_json::from_value::<CreateMovieReq>(json!({ "runtime": "107 mins" })).is_err());
        assert!(serde_json::from_value::<CreateMovieReq>(json!({ "rating": 5 })).is_err());
    }

    #[test]
    fn missing_fields_become_zero_values() {
        let req: CreateMovieReq = serde_json::from_value(json!({ "title": "Moana" })).unwrap();
        let new = NewMovie::from(req);
        assert_eq!(new.year, 0);
        assert!(new.runtime.is_zero());
        assert!(new.genres.is_empty());
    }

    #[test]
    fn update_request_distinguishes_absent_fields() {
        let req: UpdateMovieReq = serde_json::from_value(json!({ "year": 1943 })).unwrap();
        let patch = MoviePatch::from(req);
        assert_eq!(patch.year, Some(1943));
        assert!(patch.title.is_none());
        assert!(patch.runtime.is_none());
    }

    #[test]
    fn list_envelope_with_empty_metadata() {
        let value = serde_json::to_value(MovieListDto::new(vec![], Metadata::default())).unwrap();
        assert_eq!(value, json!({ "movies": [], "metadata": {} }));
    }
}
