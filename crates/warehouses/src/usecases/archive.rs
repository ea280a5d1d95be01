use chrono::Utc;
use tracing::info;

use crate::error::WarehouseResult;
use crate::model::Warehouse;
use crate::ports::{ArchiveWarehouseOperation, WarehouseStore};
use crate::validation::WarehouseValidator;

#[derive(Debug, Clone)]
pub struct ArchiveWarehouseUseCase<S, V> {
    store: S,
    validator: V,
}

impl<S, V> ArchiveWarehouseUseCase<S, V> {
    pub fn new(store: S, validator: V) -> Self {
        Self { store, validator }
    }
}

impl<S, V> ArchiveWarehouseOperation for ArchiveWarehouseUseCase<S, V>
where
    S: WarehouseStore,
    V: WarehouseValidator,
{
    /// Archive the stored record matched by business unit code.
    ///
    /// Uses `warehouse.archived_at` as the archival time when the caller set
    /// one, the current time otherwise. No other field is touched.
    fn archive(&self, warehouse: Warehouse) -> WarehouseResult<()> {
        let existing = self.validator.validate_for_archive(&warehouse)?;

        let archived_at = warehouse.archived_at.unwrap_or_else(Utc::now);
        let archived = self.store.update(existing.archived(archived_at))?;
        info!(
            business_unit_code = %archived.business_unit_code,
            archived_at = %archived_at,
            "warehouse archived"
        );
        Ok(())
    }
}
