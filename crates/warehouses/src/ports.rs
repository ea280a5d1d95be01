//! Ports consumed and exposed by the warehouse module.
//!
//! The validator and use cases consume [`LocationResolver`] and
//! [`WarehouseStore`]; callers consume the three `*Operation` traits. All ports
//! are synchronous and `Send + Sync` so wired services can be shared behind
//! `Arc`.

use std::sync::Arc;

use fulfilment_core::WarehouseId;

use crate::error::{StoreResult, WarehouseResult};
use crate::model::{Location, Warehouse};

/// Resolves location policy by identifier.
///
/// Must be idempotent and side-effect free.
pub trait LocationResolver: Send + Sync {
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location>;
}

/// Persistence boundary for warehouse records.
///
/// Adapters must enforce uniqueness of the business unit code on their own:
/// the validator's duplicate check is an early rejection, not the only guard.
pub trait WarehouseStore: Send + Sync {
    fn list_all(&self) -> StoreResult<Vec<Warehouse>>;

    /// Persist a new warehouse and return it with its assigned id.
    fn create(&self, warehouse: Warehouse) -> StoreResult<Warehouse>;

    /// Full-record replace matched by `warehouse.id`.
    fn update(&self, warehouse: Warehouse) -> StoreResult<Warehouse>;

    fn find_by_id(&self, id: WarehouseId) -> StoreResult<Option<Warehouse>>;

    fn find_by_business_unit_code(&self, code: &str) -> StoreResult<Option<Warehouse>>;

    fn exists_by_business_unit_code(&self, code: &str) -> StoreResult<bool> {
        Ok(self.find_by_business_unit_code(code)?.is_some())
    }

    /// Number of stored warehouses (active and archived) at `location`.
    fn count_by_location(&self, location: &str) -> StoreResult<u32>;

    fn remove(&self, id: WarehouseId) -> StoreResult<()>;
}

impl<S> WarehouseStore for Arc<S>
where
    S: WarehouseStore + ?Sized,
{
    fn list_all(&self) -> StoreResult<Vec<Warehouse>> {
        (**self).list_all()
    }

    fn create(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        (**self).create(warehouse)
    }

    fn update(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        (**self).update(warehouse)
    }

    fn find_by_id(&self, id: WarehouseId) -> StoreResult<Option<Warehouse>> {
        (**self).find_by_id(id)
    }

    fn find_by_business_unit_code(&self, code: &str) -> StoreResult<Option<Warehouse>> {
        (**self).find_by_business_unit_code(code)
    }

    fn exists_by_business_unit_code(&self, code: &str) -> StoreResult<bool> {
        (**self).exists_by_business_unit_code(code)
    }

    fn count_by_location(&self, location: &str) -> StoreResult<u32> {
        (**self).count_by_location(location)
    }

    fn remove(&self, id: WarehouseId) -> StoreResult<()> {
        (**self).remove(id)
    }
}

impl<L> LocationResolver for Arc<L>
where
    L: LocationResolver + ?Sized,
{
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location> {
        (**self).resolve_by_identifier(identifier)
    }
}

/// Create a new warehouse unit.
pub trait CreateWarehouseOperation: Send + Sync {
    fn create(&self, warehouse: Warehouse) -> WarehouseResult<Warehouse>;
}

/// Replace the location, capacity and stock of an existing warehouse unit.
pub trait ReplaceWarehouseOperation: Send + Sync {
    fn replace(&self, new_warehouse: Warehouse) -> WarehouseResult<()>;
}

/// Archive an active warehouse unit.
pub trait ArchiveWarehouseOperation: Send + Sync {
    fn archive(&self, warehouse: Warehouse) -> WarehouseResult<()>;
}
