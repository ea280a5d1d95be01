use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fulfilment_core::WarehouseId;
use fulfilment_warehouses::{StoreResult, Warehouse, WarehouseStore, WarehouseStoreError};

/// In-memory warehouse store.
///
/// Intended for tests/dev. The duplicate check and the insert happen under one
/// write lock, so concurrent creates of the same code cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    records: RwLock<HashMap<WarehouseId, Warehouse>>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<WarehouseId, Warehouse>>> {
        self.records
            .read()
            .map_err(|_| WarehouseStoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<WarehouseId, Warehouse>>> {
        self.records
            .write()
            .map_err(|_| WarehouseStoreError::Backend("lock poisoned".to_string()))
    }
}

fn code_taken(
    records: &HashMap<WarehouseId, Warehouse>,
    code: &str,
    except: Option<WarehouseId>,
) -> bool {
    records
        .values()
        .any(|w| w.business_unit_code == code && w.id != except)
}

impl WarehouseStore for InMemoryWarehouseStore {
    fn list_all(&self) -> StoreResult<Vec<Warehouse>> {
        let records = self.read()?;
        let mut all: Vec<Warehouse> = records.values().cloned().collect();
        all.sort_by_key(|w| w.created_at);
        Ok(all)
    }

    fn create(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        let mut records = self.write()?;
        if code_taken(&records, &warehouse.business_unit_code, None) {
            return Err(WarehouseStoreError::DuplicateBusinessUnitCode(
                warehouse.business_unit_code,
            ));
        }

        let id = WarehouseId::new();
        let created = warehouse.with_id(id);
        records.insert(id, created.clone());
        Ok(created)
    }

    fn update(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        let id = warehouse.id.ok_or(WarehouseStoreError::MissingId("update"))?;
        let mut records = self.write()?;
        if !records.contains_key(&id) {
            return Err(WarehouseStoreError::NotFound(id));
        }
        if code_taken(&records, &warehouse.business_unit_code, Some(id)) {
            return Err(WarehouseStoreError::DuplicateBusinessUnitCode(
                warehouse.business_unit_code,
            ));
        }

        records.insert(id, warehouse.clone());
        Ok(warehouse)
    }

    fn find_by_id(&self, id: WarehouseId) -> StoreResult<Option<Warehouse>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn find_by_business_unit_code(&self, code: &str) -> StoreResult<Option<Warehouse>> {
        Ok(self
            .read()?
            .values()
            .find(|w| w.business_unit_code == code)
            .cloned())
    }

    fn exists_by_business_unit_code(&self, code: &str) -> StoreResult<bool> {
        let records = self.read()?;
        Ok(code_taken(&records, code, None))
    }

    fn count_by_location(&self, location: &str) -> StoreResult<u32> {
        let count = self
            .read()?
            .values()
            .filter(|w| w.location == location)
            .count();
        u32::try_from(count)
            .map_err(|_| WarehouseStoreError::Backend(format!("count overflow at {location}")))
    }

    fn remove(&self, id: WarehouseId) -> StoreResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(WarehouseStoreError::NotFound(id))
    }
}
