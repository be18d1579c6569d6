use serde::Serialize;
use thiserror::Error;

/// Failure kinds every store operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateEmail,
    NotFound,
    InvalidCredentials,
    NoFieldsProvided,
    StorageError,
}

/// Error returned by the account store. The display text is safe to show
/// to an end user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    NoFieldsProvided(String),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::InvalidCredentials(_) => ErrorKind::InvalidCredentials,
            StoreError::NoFieldsProvided(_) => ErrorKind::NoFieldsProvided,
            StoreError::Storage(_) => ErrorKind::StorageError,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_one_to_one() {
        assert_eq!(
            StoreError::DuplicateEmail("x".into()).kind(),
            ErrorKind::DuplicateEmail
        );
        assert_eq!(StoreError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::InvalidCredentials("x".into()).kind(),
            ErrorKind::InvalidCredentials
        );
        assert_eq!(
            StoreError::NoFieldsProvided("x".into()).kind(),
            ErrorKind::NoFieldsProvided
        );
        assert_eq!(
            StoreError::Storage(sqlx::Error::PoolClosed).kind(),
            ErrorKind::StorageError
        );
    }

    #[test]
    fn message_is_displayed_verbatim() {
        let err = StoreError::DuplicateEmail("email already registered".into());
        assert_eq!(err.to_string(), "email already registered");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidCredentials).unwrap();
        assert_eq!(json, "\"invalid_credentials\"");
    }
}
