use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GreenlightError {
    #[error("failed validation")]
    Validation { errors: BTreeMap<String, String> },

    #[error("the requested resource could not be found")]
    NotFound,

    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    #[error("a user with this email address already exists")]
    DuplicateEmail,

    #[error("Internal error")]
    Internal,
}

impl GreenlightError {
    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        Self::Validation { errors }
    }

    /// Edit conflicts clear up after re-fetching the record.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EditConflict)
    }
}

impl From<DomainError> for GreenlightError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { errors } => Self::Validation { errors },
            DomainError::NotFound => Self::NotFound,
            DomainError::EditConflict => Self::EditConflict,
            DomainError::DuplicateEmail => Self::DuplicateEmail,
            DomainError::Database { .. } | DomainError::Hashing { .. } => Self::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_details_are_hidden() {
        let err: GreenlightError = DomainError::database("connection refused to 10.0.0.3").into();
        assert_eq!(err, GreenlightError::Internal);
        assert!(!err.to_string().contains("10.0.0.3"));

        let err: GreenlightError = DomainError::hashing("bad params").into();
        assert_eq!(err, GreenlightError::Internal);
    }

    #[test]
    fn validation_errors_keep_their_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), "must be provided".to_string());
        let err: GreenlightError = DomainError::validation(errors.clone()).into();
        assert_eq!(err, GreenlightError::validation(errors));
        assert_eq!(
            GreenlightError::from(DomainError::DuplicateEmail),
            GreenlightError::DuplicateEmail
        );
    }

    #[test]
    fn only_edit_conflicts_are_retryable() {
        assert!(GreenlightError::from(DomainError::EditConflict).is_retryable());
        assert!(!GreenlightError::from(DomainError::NotFound).is_retryable());
    }
}
