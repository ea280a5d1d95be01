//! Warehouse error model.

use thiserror::Error;

use fulfilment_core::WarehouseId;

/// Result type of the warehouse validator and use cases.
pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Result type of [`crate::WarehouseStore`] operations.
pub type StoreResult<T> = Result<T, WarehouseStoreError>;

/// Failure reported by a warehouse store adapter.
///
/// These are storage-level failures (constraint violations, missing rows,
/// connectivity). The validator never produces them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarehouseStoreError {
    /// The unique constraint on the business unit code rejected a write.
    #[error("warehouse with business unit code '{0}' already exists")]
    DuplicateBusinessUnitCode(String),

    /// No stored record carries this identifier.
    #[error("warehouse not found with id: {0}")]
    NotFound(WarehouseId),

    /// The operation needs a persisted warehouse but the value carries no id.
    #[error("warehouse id must be set to {0}")]
    MissingId(&'static str),

    /// Connectivity or other backend failure.
    #[error("warehouse storage failure: {0}")]
    Backend(String),
}

/// Warehouse use-case error.
///
/// Validator rejections are `InvalidLocation`, `NotFound` or `Validation`;
/// store failures are wrapped untouched in `Persistence`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarehouseError {
    /// The referenced location does not exist or is malformed.
    #[error("invalid warehouse location: {0}")]
    InvalidLocation(String),

    /// No warehouse exists for the referenced business unit code.
    #[error("{0}")]
    NotFound(String),

    /// A business rule would be violated.
    #[error("{0}")]
    Validation(String),

    /// The warehouse store failed.
    #[error(transparent)]
    Persistence(#[from] WarehouseStoreError),
}

impl WarehouseError {
    pub fn invalid_location(location: impl Into<String>) -> Self {
        Self::InvalidLocation(location.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
