use tracing::info;

use crate::error::WarehouseResult;
use crate::model::Warehouse;
use crate::ports::{CreateWarehouseOperation, WarehouseStore};
use crate::validation::WarehouseValidator;

#[derive(Debug, Clone)]
pub struct CreateWarehouseUseCase<S, V> {
    store: S,
    validator: V,
}

impl<S, V> CreateWarehouseUseCase<S, V> {
    pub fn new(store: S, validator: V) -> Self {
        Self { store, validator }
    }
}

impl<S, V> CreateWarehouseOperation for CreateWarehouseUseCase<S, V>
where
    S: WarehouseStore,
    V: WarehouseValidator,
{
    fn create(&self, warehouse: Warehouse) -> WarehouseResult<Warehouse> {
        self.validator.validate_for_create(&warehouse)?;

        let created = self.store.create(warehouse)?;
        info!(
            business_unit_code = %created.business_unit_code,
            location = %created.location,
            "warehouse created"
        );
        Ok(created)
    }
}
