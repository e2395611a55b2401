use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

/// Movie runtime in minutes.
///
/// On the wire it is a quoted numeric string (`"102"`); both the quoted and
/// the bare numeric forms are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(pub i32);

impl Runtime {
    pub fn minutes(self) -> i32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuntimeVisitor;

        impl<'de> Visitor<'de> for RuntimeVisitor {
            type Value = Runtime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a runtime in minutes, as an integer or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Runtime, E> {
                i32::try_from(v)
                    .map(Runtime)
                    .map_err(|_| E::custom("invalid runtime format"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Runtime, E> {
                i32::try_from(v)
                    .map(Runtime)
                    .map_err(|_| E::custom("invalid runtime format"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Runtime, E> {
                v.parse::<i32>()
                    .map(Runtime)
                    .map_err(|_| E::custom("invalid runtime format"))
            }
        }

        deserializer.deserialize_any(RuntimeVisitor)
    }
}

/// A movie record. `id`, `created_at` and `version` are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Data for creating a new movie.
#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

impl From<NewMovie> for Movie {
    fn from(new: NewMovie) -> Self {
        Self {
            title: new.title,
            year: new.year,
            runtime: new.runtime,
            genres: new.genres,
            ..Default::default()
        }
    }
}

impl Movie {
    pub fn apply(&mut self, patch: &MoviePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(runtime) = patch.runtime {
            self.runtime = runtime;
        }
        if let Some(genres) = &patch.genres {
            self.genres = genres.clone();
        }
    }
}

/// A user's password in its two forms.
///
/// The plaintext only lives for the duration of a request and is wiped on
/// drop; the hash is the only form that reaches the store. A missing hash is
/// an explicit state, checked with [`Password::has_hash`].
#[derive(Clone, Default)]
pub struct Password {
    pub(crate) plaintext: Option<Zeroizing<String>>,
    pub(crate) hash: Option<String>,
}

impl Password {
    /// Wrap a hash loaded from the store.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self {
            plaintext: None,
            hash: Some(hash.into()),
        }
    }

    pub fn has_hash(&self) -> bool {
        self.hash.is_some()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_ref().map(|p| p.as_str())
    }

    /// The stored hash of a fully-formed user.
    ///
    /// # Panics
    /// When no hash was ever set: the caller skipped `Password::set`.
    #[track_caller]
    pub fn expect_hash(&self) -> &str {
        match self.hash.as_deref() {
            Some(hash) => hash,
            None => panic!("missing password hash for user"),
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("plaintext", &self.plaintext.as_ref().map(|_| "<redacted>"))
            .field("hash", &self.hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A user account. The email is unique across all users.
#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub activated: bool,
    pub version: i32,
}

/// Data for registering a new user.
#[derive(Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial update of a user; `password` replaces the stored hash.
#[derive(Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub activated: Option<bool>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("activated", &self.activated)
            .finish()
    }
}

/// Pagination summary for a listing. Every field is zero when nothing matched,
/// and zero fields are left out of the JSON form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_serializes_as_quoted_number() {
        assert_eq!(serde_json::to_string(&Runtime(102)).unwrap(), "\"102\"");
    }

    #[test]
    fn runtime_accepts_number_or_numeric_string() {
        let a: Runtime = serde_json::from_str("\"107\"").unwrap();
        let b: Runtime = serde_json::from_str("107").unwrap();
        assert_eq!(a, Runtime(107));
        assert_eq!(a, b);
    }

    #[test]
    fn runtime_rejects_other_input() {
        assert!(serde_json::from_str::<Runtime>("\"107 mins\"").is_err());
        assert!(serde_json::from_str::<Runtime>("true").is_err());
        assert!(serde_json::from_str::<Runtime>("99999999999").is_err());
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut movie = Movie {
            id: 4,
            title: "Moana".into(),
            year: 2016,
            runtime: Runtime(107),
            genres: vec!["animation".into()],
            version: 2,
            ..Default::default()
        };
        movie.apply(&MoviePatch {
            year: Some(2017),
            ..Default::default()
        });
        assert_eq!(movie.title, "Moana");
        assert_eq!(movie.year, 2017);
        assert_eq!(movie.runtime, Runtime(107));
        assert_eq!(movie.version, 2);
    }

    #[test]
    fn password_debug_never_shows_secrets() {
        let pw = Password {
            plaintext: Some(Zeroizing::new("pa55word!".to_string())),
            hash: Some("$argon2id$v=19$secret".to_string()),
        };
        let out = format!("{pw:?}");
        assert!(!out.contains("pa55word"));
        assert!(!out.contains("argon2id"));

        let patch = UserPatch {
            password: Some("hunter22".into()),
            ..Default::default()
        };
        assert!(!format!("{patch:?}").contains("hunter22"));
        let new_user = NewUser {
            password: "hunter22".into(),
            ..Default::default()
        };
        assert!(!format!("{new_user:?}").contains("hunter22"));
    }

    #[test]
    #[should_panic(expected = "missing password hash")]
    fn expect_hash_panics_without_hash() {
        let _ = Password::default().expect_hash();
    }

    #[test]
    fn empty_metadata_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Metadata::default()).unwrap(), "{}");
    }
}
