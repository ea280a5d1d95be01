use std::collections::HashMap;
use std::sync::RwLock;

use fulfilment_core::StoreId;
use fulfilment_stores::{RepositoryError, Store, StoreRepository};

/// In-memory store repository for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    inner: RwLock<HashMap<StoreId, Store>>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError("lock poisoned".to_string())
}

impl StoreRepository for InMemoryStoreRepository {
    fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        Ok(self.inner.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        Ok(self.inner.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn save(&self, store: Store) -> Result<Store, RepositoryError> {
        self.inner
            .write()
            .map_err(poisoned)?
            .insert(store.id, store.clone());
        Ok(store)
    }

    fn delete(&self, id: StoreId) -> Result<bool, RepositoryError> {
        Ok(self.inner.write().map_err(poisoned)?.remove(&id).is_some())
    }
}
