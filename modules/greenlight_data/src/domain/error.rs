use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → message.
pub type ValidationErrors = BTreeMap<String, String>;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("failed validation: {}", render(errors))]
    Validation { errors: ValidationErrors },

    #[error("record not found")]
    NotFound,

    #[error("edit conflict: record was modified concurrently")]
    EditConflict,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Password hashing error: {message}")]
    Hashing { message: String },
}

impl DomainError {
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.insert(field.into(), message.into());
        Self::Validation { errors }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

fn render(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join(", ")
}
