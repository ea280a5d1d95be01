//! Fulfilment stores module.
//!
//! CRUD over store records with a post-commit notification to the legacy store
//! manager after every create and update.

pub mod error;
pub mod legacy;
pub mod repository;
pub mod service;
pub mod store;

pub use error::{LegacySyncError, RepositoryError, StoreError, StoreResult};
pub use legacy::LegacyStoreGateway;
pub use repository::StoreRepository;
pub use service::StoreService;
pub use store::{Store, StoreDraft};
