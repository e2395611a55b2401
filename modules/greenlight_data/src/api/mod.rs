//! Transport-facing representations: JSON DTOs and query-string parsing.

pub mod dto;
pub mod params;
