use thiserror::Error;

use fulfilment_core::{DomainError, StoreId};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a store repository adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("store repository failure: {0}")]
pub struct RepositoryError(pub String);

/// Failure reported by the legacy store manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("legacy store manager failure: {0}")]
pub struct LegacySyncError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store with id of {0} does not exist")]
    NotFound(StoreId),

    /// The request itself is malformed.
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The local write succeeded but the legacy system was not told about it.
    #[error(transparent)]
    LegacySync(#[from] LegacySyncError),
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => StoreError::Invalid(msg),
        }
    }
}
