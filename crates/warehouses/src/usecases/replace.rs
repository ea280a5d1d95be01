use tracing::info;

use crate::error::WarehouseResult;
use crate::model::Warehouse;
use crate::ports::{ReplaceWarehouseOperation, WarehouseStore};
use crate::validation::WarehouseValidator;

#[derive(Debug, Clone)]
pub struct ReplaceWarehouseUseCase<S, V> {
    store: S,
    validator: V,
}

impl<S, V> ReplaceWarehouseUseCase<S, V> {
    pub fn new(store: S, validator: V) -> Self {
        Self { store, validator }
    }
}

impl<S, V> ReplaceWarehouseOperation for ReplaceWarehouseUseCase<S, V>
where
    S: WarehouseStore,
    V: WarehouseValidator,
{
    /// Replace the stored record matched by business unit code.
    ///
    /// The stored id and lifecycle timestamps are kept; location, capacity and
    /// stock come from `new_warehouse`.
    fn replace(&self, new_warehouse: Warehouse) -> WarehouseResult<()> {
        let existing = self.validator.validate_for_replace(&new_warehouse)?;

        let replaced = self.store.update(new_warehouse.replacing(&existing))?;
        info!(
            business_unit_code = %replaced.business_unit_code,
            location = %replaced.location,
            capacity = replaced.capacity,
            "warehouse replaced"
        );
        Ok(())
    }
}
