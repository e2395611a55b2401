//! Pagination and sorting parameters for listings.

use crate::contract::model::Metadata;
use crate::domain::error::DomainError;
use crate::domain::validator::{permitted_value, Validator};

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

/// Columns a movie listing may be ordered by.
pub const MOVIE_SORT_SAFELIST: &[&str] = &["id", "title", "year", "runtime"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Column name, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    pub fn for_movies(page: i64, page_size: i64, sort: impl Into<String>) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist: MOVIE_SORT_SAFELIST,
        }
    }

    /// The allow-listed column to order by.
    ///
    /// The returned string is the allow-list entry itself, never caller input.
    pub fn sort_column(&self) -> Result<&'static str, DomainError> {
        let key = self.sort.strip_prefix('-').unwrap_or(&self.sort);
        self.sort_safelist
            .iter()
            .copied()
            .find(|col| *col == key)
            .ok_or_else(|| DomainError::invalid_field("sort", "invalid sort value"))
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    fn permitted_sort_values(&self) -> Vec<String> {
        self.sort_safelist
            .iter()
            .flat_map(|col| [col.to_string(), format!("-{col}")])
            .collect()
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::for_movies(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT)
    }
}

pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(f.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        f.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&f.sort, &f.permitted_sort_values()),
        "sort",
        "invalid sort value",
    );
}

impl Metadata {
    /// Pagination summary for `total_records` matches viewed at `page`.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: total_records / page_size + i64::from(total_records % page_size != 0),
            total_records,
        }
    }
}

/// A movie listing request: full-text title search, genre containment and paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub title: String,
    pub genres: Vec<String>,
    pub filters: Filters,
}
