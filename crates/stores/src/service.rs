use tracing::{error, info};

use fulfilment_core::StoreId;

use crate::error::{StoreError, StoreResult};
use crate::legacy::LegacyStoreGateway;
use crate::repository::StoreRepository;
use crate::store::{Store, StoreDraft};

#[derive(Debug, Clone, Copy)]
enum LegacyChange {
    Created,
    Updated,
}

/// Store CRUD with post-commit legacy synchronization.
#[derive(Debug, Clone)]
pub struct StoreService<R, G> {
    repository: R,
    legacy: G,
}

impl<R, G> StoreService<R, G> {
    pub fn new(repository: R, legacy: G) -> Self {
        Self { repository, legacy }
    }
}

impl<R, G> StoreService<R, G>
where
    R: StoreRepository,
    G: LegacyStoreGateway,
{
    /// All stores, sorted by name.
    pub fn list(&self) -> StoreResult<Vec<Store>> {
        info!("listing stores");
        let mut stores = self.repository.list()?;
        stores.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stores)
    }

    pub fn get(&self, id: StoreId) -> StoreResult<Store> {
        info!(store_id = %id, "getting store");
        self.repository.get(id)?.ok_or(StoreError::NotFound(id))
    }

    /// Create a store. The id is assigned here; a draft that already carries
    /// one is rejected.
    pub fn create(&self, draft: StoreDraft) -> StoreResult<Store> {
        if draft.id.is_some() {
            return Err(StoreError::Invalid("id was invalidly set on request".to_string()));
        }
        let name = draft.required_name()?;
        info!(name = %name, "creating store");

        let store = self.repository.save(Store {
            id: StoreId::new(),
            name: name.to_string(),
            quantity_products_in_stock: draft.quantity_products_in_stock.unwrap_or(0),
        })?;

        self.notify_legacy(LegacyChange::Created, &store)?;
        info!(store_id = %store.id, "store created");
        Ok(store)
    }

    /// Replace name and quantity of an existing store.
    pub fn update(&self, id: StoreId, draft: StoreDraft) -> StoreResult<Store> {
        let name = draft.required_name()?;
        info!(store_id = %id, name = %name, "updating store");

        let mut store = self.get(id)?;
        store.name = name.to_string();
        store.quantity_products_in_stock = draft.quantity_products_in_stock.unwrap_or(0);

        let store = self.repository.save(store)?;
        self.notify_legacy(LegacyChange::Updated, &store)?;
        info!(store_id = %store.id, "store updated");
        Ok(store)
    }

    /// Like [`Self::update`], but the quantity is only replaced when the draft
    /// carries one.
    pub fn patch(&self, id: StoreId, draft: StoreDraft) -> StoreResult<Store> {
        let name = draft.required_name()?;
        info!(store_id = %id, name = %name, "patching store");

        let mut store = self.get(id)?;
        store.name = name.to_string();
        if let Some(quantity) = draft.quantity_products_in_stock {
            store.quantity_products_in_stock = quantity;
        }

        let store = self.repository.save(store)?;
        self.notify_legacy(LegacyChange::Updated, &store)?;
        info!(store_id = %store.id, "store patched");
        Ok(store)
    }

    pub fn delete(&self, id: StoreId) -> StoreResult<()> {
        info!(store_id = %id, "deleting store");
        if !self.repository.delete(id)? {
            return Err(StoreError::NotFound(id));
        }
        info!(store_id = %id, "store deleted");
        Ok(())
    }

    fn notify_legacy(&self, change: LegacyChange, store: &Store) -> StoreResult<()> {
        info!(store_id = %store.id, ?change, "syncing store to legacy system");
        let result = match change {
            LegacyChange::Created => self.legacy.create_store_on_legacy_system(store),
            LegacyChange::Updated => self.legacy.update_store_on_legacy_system(store),
        };
        result.map_err(|err| {
            error!(store_id = %store.id, ?change, error = %err, "failed to sync store to legacy system");
            StoreError::from(err)
        })
    }
}
