//! Warehouse domain module.
//!
//! Business rules for the warehouse lifecycle (create, replace, archive),
//! implemented as validation + orchestration over two ports: the
//! [`WarehouseStore`] and the [`LocationResolver`]. No IO happens here; adapters
//! live in `fulfilment-infra`.

pub mod error;
pub mod model;
pub mod ports;
pub mod usecases;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{StoreResult, WarehouseError, WarehouseResult, WarehouseStoreError};
pub use model::{Location, Warehouse};
pub use ports::{
    ArchiveWarehouseOperation, CreateWarehouseOperation, LocationResolver,
    ReplaceWarehouseOperation, WarehouseStore,
};
pub use usecases::{ArchiveWarehouseUseCase, CreateWarehouseUseCase, ReplaceWarehouseUseCase};
pub use validation::{DefaultWarehouseValidator, WarehouseValidator};
