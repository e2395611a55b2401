//! Query-string readers. Malformed numbers are recorded on the validator
//! and replaced by the default so parsing always yields a value.

use std::collections::HashMap;

use crate::domain::filters::{Filters, MovieQuery, DEFAULT_PAGE, DEFAULT_SORT};
use crate::domain::validator::Validator;

pub fn read_string(qs: &HashMap<String, String>, key: &str, default: &str) -> String {
    match qs.get(key) {
        Some(s) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

pub fn read_csv(qs: &HashMap<String, String>, key: &str, default: &[String]) -> Vec<String> {
    match qs.get(key) {
        Some(s) if !s.is_empty() => s
            .split(',')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => default.to_vec(),
    }
}

pub fn read_int(qs: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match qs.get(key) {
        Some(s) if !s.is_empty() => match s.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                v.add_error(key, "must be an integer value");
                default
            }
        },
        _ => default,
    }
}

impl MovieQuery {
    /// Read `title`, `genres`, `page`, `page_size` and `sort` from a query string.
    ///
    /// Range and allow-list checks are left to `validate_filters`.
    pub fn from_query(qs: &HashMap<String, String>, default_page_size: i64, v: &mut Validator) -> Self {
        Self {
            title: read_string(qs, "title", ""),
            genres: read_csv(qs, "genres", &[]),
            filters: Filters::for_movies(
                read_int(qs, "page", DEFAULT_PAGE, v),
                read_int(qs, "page_size", default_page_size, v),
                read_string(qs, "sort", DEFAULT_SORT),
            ),
        }
    }
}
