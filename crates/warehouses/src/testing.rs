//! In-memory fakes for the warehouse ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use fulfilment_core::WarehouseId;

use crate::error::{StoreResult, WarehouseStoreError};
use crate::model::{Location, Warehouse};
use crate::ports::{LocationResolver, WarehouseStore};

pub fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn warehouse(code: &str, location: &str, capacity: u32, stock: u32) -> Warehouse {
    Warehouse::new(code, location, capacity, stock, ts(1_700_000_000)).unwrap()
}

#[derive(Debug, Default)]
pub struct FakeLocations {
    locations: HashMap<String, Location>,
}

impl FakeLocations {
    pub fn with(mut self, key: &str, location: Location) -> Self {
        self.locations.insert(key.to_string(), location);
        self
    }
}

impl LocationResolver for FakeLocations {
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location> {
        self.locations.get(identifier).cloned()
    }
}

/// Map-backed store that records how often it was asked to mutate, and can be
/// told to report a fixed location count.
#[derive(Debug, Default)]
pub struct SpyStore {
    records: Mutex<Vec<Warehouse>>,
    location_count: Option<u32>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    fail_writes: bool,
}

impl SpyStore {
    pub fn seeded(records: Vec<Warehouse>) -> Self {
        Self {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|w| if w.id.is_some() { w } else { w.with_id(WarehouseId::new()) })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn counting(mut self, count: u32) -> Self {
        self.location_count = Some(count);
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self, code: &str) -> Option<Warehouse> {
        self.find_by_business_unit_code(code).unwrap()
    }
}

impl WarehouseStore for SpyStore {
    fn list_all(&self) -> StoreResult<Vec<Warehouse>> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn create(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(WarehouseStoreError::Backend("connection refused".to_string()));
        }
        let created = warehouse.with_id(WarehouseId::new());
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(WarehouseStoreError::Backend("connection refused".to_string()));
        }
        let id = warehouse.id.ok_or(WarehouseStoreError::MissingId("update"))?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|w| w.id == Some(id))
            .ok_or(WarehouseStoreError::NotFound(id))?;
        *slot = warehouse.clone();
        Ok(warehouse)
    }

    fn find_by_id(&self, id: WarehouseId) -> StoreResult<Option<Warehouse>> {
        Ok(self.records.lock().unwrap().iter().find(|w| w.id == Some(id)).cloned())
    }

    fn find_by_business_unit_code(&self, code: &str) -> StoreResult<Option<Warehouse>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.business_unit_code == code)
            .cloned())
    }

    fn count_by_location(&self, location: &str) -> StoreResult<u32> {
        if let Some(count) = self.location_count {
            return Ok(count);
        }
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|w| w.location == location).count() as u32)
    }

    fn remove(&self, id: WarehouseId) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|w| w.id != Some(id));
        if records.len() == before {
            return Err(WarehouseStoreError::NotFound(id));
        }
        Ok(())
    }
}
