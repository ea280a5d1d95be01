//! Warehouse lifecycle rules.
//!
//! Each check list runs in a fixed order and stops at the first failure; the
//! error of that check is returned and later checks are not evaluated.
//!
//! ```text
//! create : duplicate code -> location -> location count -> location capacity -> stock <= capacity
//! replace: existing       -> location -> capacity >= existing stock -> stock unchanged
//! archive: existing       -> not already archived
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::{WarehouseError, WarehouseResult};
use crate::model::{Location, Warehouse};
use crate::ports::{LocationResolver, WarehouseStore};

/// Accepts or rejects warehouse lifecycle operations.
///
/// Replace and archive hand back the currently stored record on success so the
/// caller can build the full-record update from it.
pub trait WarehouseValidator: Send + Sync {
    fn validate_for_create(&self, warehouse: &Warehouse) -> WarehouseResult<()>;

    fn validate_for_replace(&self, new_warehouse: &Warehouse) -> WarehouseResult<Warehouse>;

    fn validate_for_archive(&self, warehouse: &Warehouse) -> WarehouseResult<Warehouse>;
}

impl<V> WarehouseValidator for Arc<V>
where
    V: WarehouseValidator + ?Sized,
{
    fn validate_for_create(&self, warehouse: &Warehouse) -> WarehouseResult<()> {
        (**self).validate_for_create(warehouse)
    }

    fn validate_for_replace(&self, new_warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        (**self).validate_for_replace(new_warehouse)
    }

    fn validate_for_archive(&self, warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        (**self).validate_for_archive(warehouse)
    }
}

/// Validator backed by a warehouse store and a location resolver.
///
/// Holds no state of its own between calls.
#[derive(Debug, Clone)]
pub struct DefaultWarehouseValidator<S, L> {
    store: S,
    locations: L,
}

impl<S, L> DefaultWarehouseValidator<S, L> {
    pub fn new(store: S, locations: L) -> Self {
        Self { store, locations }
    }
}

impl<S, L> DefaultWarehouseValidator<S, L>
where
    S: WarehouseStore,
    L: LocationResolver,
{
    fn resolve_location(&self, identifier: &str) -> WarehouseResult<Location> {
        self.locations
            .resolve_by_identifier(identifier)
            .filter(Location::is_identified)
            .ok_or_else(|| WarehouseError::invalid_location(identifier))
    }

    fn find_existing(&self, code: &str) -> WarehouseResult<Warehouse> {
        self.store.find_by_business_unit_code(code)?.ok_or_else(|| {
            WarehouseError::not_found(format!(
                "warehouse with business unit code '{code}' does not exist"
            ))
        })
    }

    fn check_create(&self, warehouse: &Warehouse) -> WarehouseResult<()> {
        let code = &warehouse.business_unit_code;
        if self.store.exists_by_business_unit_code(code)? {
            return Err(WarehouseError::validation(format!(
                "warehouse with business unit code '{code}' already exists"
            )));
        }

        let location = self.resolve_location(&warehouse.location)?;

        let existing = self.store.count_by_location(&location.identification)?;
        if existing >= location.max_number_of_warehouses {
            return Err(WarehouseError::validation(format!(
                "cannot create new warehouse at location '{}': maximum number of warehouses ({}) reached",
                location.identification, location.max_number_of_warehouses
            )));
        }

        if warehouse.capacity > location.max_capacity {
            return Err(WarehouseError::validation(format!(
                "warehouse capacity ({}) exceeds max capacity for location ({})",
                warehouse.capacity, location.max_capacity
            )));
        }

        if warehouse.stock > warehouse.capacity {
            return Err(WarehouseError::validation(format!(
                "warehouse stock ({}) cannot exceed its capacity ({})",
                warehouse.stock, warehouse.capacity
            )));
        }

        Ok(())
    }

    fn check_replace(&self, new_warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        let existing = self.find_existing(&new_warehouse.business_unit_code)?;

        self.resolve_location(&new_warehouse.location)?;

        if new_warehouse.capacity < existing.stock {
            return Err(WarehouseError::validation(format!(
                "new warehouse capacity ({}) cannot accommodate existing stock ({})",
                new_warehouse.capacity, existing.stock
            )));
        }

        if new_warehouse.stock != existing.stock {
            return Err(WarehouseError::validation(format!(
                "new warehouse stock ({}) must match existing warehouse stock ({})",
                new_warehouse.stock, existing.stock
            )));
        }

        Ok(existing)
    }

    fn check_archive(&self, warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        let existing = self.find_existing(&warehouse.business_unit_code)?;

        if existing.is_archived() {
            return Err(WarehouseError::validation(format!(
                "warehouse '{}' is already archived",
                existing.business_unit_code
            )));
        }

        Ok(existing)
    }
}

impl<S, L> WarehouseValidator for DefaultWarehouseValidator<S, L>
where
    S: WarehouseStore,
    L: LocationResolver,
{
    fn validate_for_create(&self, warehouse: &Warehouse) -> WarehouseResult<()> {
        self.check_create(warehouse).inspect_err(|err| {
            debug!(business_unit_code = %warehouse.business_unit_code, error = %err, "create rejected");
        })
    }

    fn validate_for_replace(&self, new_warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        self.check_replace(new_warehouse).inspect_err(|err| {
            debug!(business_unit_code = %new_warehouse.business_unit_code, error = %err, "replace rejected");
        })
    }

    fn validate_for_archive(&self, warehouse: &Warehouse) -> WarehouseResult<Warehouse> {
        self.check_archive(warehouse).inspect_err(|err| {
            debug!(business_unit_code = %warehouse.business_unit_code, error = %err, "archive rejected");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarehouseStoreError;
    use crate::testing::{FakeLocations, SpyStore, ts, warehouse};
    use proptest::prelude::*;

    fn ncr() -> FakeLocations {
        FakeLocations::default().with("ncr", Location::new("1", 32, 30))
    }

    fn validator(store: SpyStore, locations: FakeLocations) -> DefaultWarehouseValidator<SpyStore, FakeLocations> {
        DefaultWarehouseValidator::new(store, locations)
    }

    fn assert_validation(result: WarehouseResult<impl core::fmt::Debug>, fragment: &str) {
        match result {
            Err(WarehouseError::Validation(msg)) if msg.contains(fragment) => {}
            other => panic!("expected validation failure containing {fragment:?}, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_duplicate_business_unit_code_before_resolving_location() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 10, 0)]);
        let v = validator(store, FakeLocations::default());

        assert_validation(v.validate_for_create(&warehouse("1", "ncr", 10, 0)), "already exists");
    }

    #[test]
    fn create_rejects_unknown_location() {
        let v = validator(SpyStore::default(), FakeLocations::default());

        let err = v.validate_for_create(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert_eq!(err, WarehouseError::InvalidLocation("ncr".to_string()));
    }

    #[test]
    fn create_treats_unidentified_location_as_unknown() {
        let locations = FakeLocations::default().with("ncr", Location::new("", 32, 30));
        let v = validator(SpyStore::default(), locations);

        let err = v.validate_for_create(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert!(matches!(err, WarehouseError::InvalidLocation(_)));
    }

    #[test]
    fn create_rejects_when_location_is_full() {
        let v = validator(SpyStore::default().counting(32), ncr());

        assert_validation(
            v.validate_for_create(&warehouse("1", "ncr", 10, 0)),
            "maximum number of warehouses",
        );
    }

    #[test]
    fn create_reports_count_ceiling_before_capacity_ceiling() {
        // 33 warehouses counted against a ceiling of 32, capacity 31 against 30.
        let v = validator(SpyStore::default().counting(33), ncr());

        assert_validation(
            v.validate_for_create(&warehouse("1", "ncr", 31, 0)),
            "maximum number of warehouses",
        );
    }

    #[test]
    fn create_rejects_capacity_above_location_maximum() {
        let v = validator(SpyStore::default().counting(3), ncr());

        assert_validation(
            v.validate_for_create(&warehouse("1", "ncr", 31, 0)),
            "exceeds max capacity",
        );
    }

    #[test]
    fn create_rejects_stock_above_capacity() {
        let v = validator(SpyStore::default(), ncr());

        assert_validation(
            v.validate_for_create(&warehouse("1", "ncr", 20, 21)),
            "cannot exceed its capacity",
        );
    }

    #[test]
    fn create_accepts_warehouse_within_policy() {
        let v = validator(SpyStore::default().counting(31), ncr());

        assert!(v.validate_for_create(&warehouse("1", "ncr", 30, 30)).is_ok());
    }

    #[test]
    fn create_counts_by_resolved_location_identification() {
        // Request key "ncr" resolves to identification "1"; stored warehouses
        // are counted under the identification.
        let locations = FakeLocations::default().with("ncr", Location::new("1", 1, 30));
        let store = SpyStore::seeded(vec![warehouse("other", "1", 10, 0)]);
        let v = validator(store, locations);

        assert_validation(
            v.validate_for_create(&warehouse("2", "ncr", 10, 0)),
            "maximum number of warehouses",
        );
    }

    #[test]
    fn replace_rejects_unknown_warehouse() {
        let v = validator(SpyStore::default(), ncr());

        let err = v.validate_for_replace(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert!(matches!(err, WarehouseError::NotFound(msg) if msg.contains("'1'")));
    }

    #[test]
    fn replace_rejects_unknown_location() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 10, 0)]);
        let v = validator(store, FakeLocations::default());

        let err = v.validate_for_replace(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert_eq!(err, WarehouseError::InvalidLocation("ncr".to_string()));
    }

    #[test]
    fn replace_rejects_capacity_below_existing_stock() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 40, 32)]);
        let v = validator(store, ncr());

        assert_validation(
            v.validate_for_replace(&warehouse("1", "ncr", 31, 0)),
            "cannot accommodate existing stock",
        );
    }

    #[test]
    fn replace_reports_capacity_failure_before_stock_mismatch() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 40, 32)]);
        let v = validator(store, ncr());

        assert_validation(
            v.validate_for_replace(&warehouse("1", "ncr", 31, 33)),
            "cannot accommodate existing stock",
        );
    }

    #[test]
    fn replace_rejects_stock_change() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 40, 32)]);
        let v = validator(store, ncr());

        assert_validation(
            v.validate_for_replace(&warehouse("1", "ncr", 40, 33)),
            "must match existing warehouse stock",
        );
    }

    #[test]
    fn replace_returns_the_stored_record() {
        let stored = warehouse("1", "ncr", 40, 32);
        let store = SpyStore::seeded(vec![stored.clone()]);
        let v = validator(store, ncr());

        let existing = v.validate_for_replace(&warehouse("1", "ncr", 35, 32)).unwrap();
        assert_eq!(existing.business_unit_code, "1");
        assert_eq!(existing.capacity, 40);
        assert!(existing.id.is_some());
    }

    #[test]
    fn archive_rejects_unknown_warehouse() {
        let v = validator(SpyStore::default(), ncr());

        let err = v.validate_for_archive(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert!(matches!(err, WarehouseError::NotFound(_)));
    }

    #[test]
    fn archive_rejects_already_archived_warehouse() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 10, 0).archived(ts(5))]);
        let v = validator(store, ncr());

        assert_validation(v.validate_for_archive(&warehouse("1", "ncr", 10, 0)), "already archived");
    }

    #[test]
    fn archive_accepts_active_warehouse() {
        let store = SpyStore::seeded(vec![warehouse("1", "ncr", 10, 0)]);
        let v = validator(store, ncr());

        assert!(v.validate_for_archive(&warehouse("1", "ncr", 10, 0)).is_ok());
    }

    #[test]
    fn store_failures_surface_as_persistence_errors() {
        struct BrokenStore;

        impl WarehouseStore for BrokenStore {
            fn list_all(&self) -> crate::StoreResult<Vec<Warehouse>> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn create(&self, _: Warehouse) -> crate::StoreResult<Warehouse> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn update(&self, _: Warehouse) -> crate::StoreResult<Warehouse> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn find_by_id(&self, _: fulfilment_core::WarehouseId) -> crate::StoreResult<Option<Warehouse>> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn find_by_business_unit_code(&self, _: &str) -> crate::StoreResult<Option<Warehouse>> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn count_by_location(&self, _: &str) -> crate::StoreResult<u32> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
            fn remove(&self, _: fulfilment_core::WarehouseId) -> crate::StoreResult<()> {
                Err(WarehouseStoreError::Backend("down".to_string()))
            }
        }

        let v = DefaultWarehouseValidator::new(BrokenStore, ncr());
        let err = v.validate_for_archive(&warehouse("1", "ncr", 10, 0)).unwrap_err();
        assert_eq!(
            err,
            WarehouseError::Persistence(WarehouseStoreError::Backend("down".to_string()))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock above capacity is always rejected on create.
        #[test]
        fn create_never_accepts_stock_above_capacity(
            capacity in 0u32..1_000,
            excess in 1u32..1_000,
        ) {
            let locations = FakeLocations::default().with("ncr", Location::new("ncr", u32::MAX, u32::MAX));
            let v = validator(SpyStore::default(), locations);

            let result = v.validate_for_create(&warehouse("1", "ncr", capacity, capacity + excess));
            prop_assert!(matches!(result, Err(WarehouseError::Validation(_))));
        }

        /// Property: a known business unit code is rejected on create whatever
        /// the other fields say.
        #[test]
        fn create_rejects_known_code_regardless_of_fields(
            location in "[a-z]{1,8}",
            capacity in any::<u32>(),
            stock in any::<u32>(),
        ) {
            let store = SpyStore::seeded(vec![warehouse("1", "ncr", 10, 0)]);
            let v = validator(store, ncr());

            let result = v.validate_for_create(&warehouse("1", &location, capacity, stock));
            prop_assert!(matches!(result, Err(WarehouseError::Validation(msg)) if msg.contains("already exists")));
        }

        /// Property: replace rejects any stock change when capacity and
        /// location are otherwise fine.
        #[test]
        fn replace_rejects_any_stock_change(
            existing_stock in 0u32..500,
            new_stock in 0u32..500,
            headroom in 0u32..500,
        ) {
            prop_assume!(new_stock != existing_stock);
            let store = SpyStore::seeded(vec![warehouse("1", "ncr", existing_stock + headroom, existing_stock)]);
            let v = validator(store, ncr());

            let request = warehouse("1", "ncr", existing_stock.max(new_stock) + headroom, new_stock);
            let result = v.validate_for_replace(&request);
            prop_assert!(matches!(result, Err(WarehouseError::Validation(msg)) if msg.contains("must match")));
        }

        /// Property: replacing an unknown code is `NotFound` whether or not the
        /// location resolves.
        #[test]
        fn replace_of_unknown_code_is_not_found(resolvable in any::<bool>()) {
            let locations = if resolvable { ncr() } else { FakeLocations::default() };
            let v = validator(SpyStore::default(), locations);

            let result = v.validate_for_replace(&warehouse("1", "ncr", 10, 0));
            prop_assert!(matches!(result, Err(WarehouseError::NotFound(_))));
        }
    }
}
