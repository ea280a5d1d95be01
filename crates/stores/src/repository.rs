use std::sync::Arc;

use fulfilment_core::StoreId;

use crate::error::RepositoryError;
use crate::store::Store;

/// Persistence boundary for store records.
pub trait StoreRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Store>, RepositoryError>;

    fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError>;

    /// Insert or overwrite the record keyed by `store.id`.
    fn save(&self, store: Store) -> Result<Store, RepositoryError>;

    /// Returns `false` when no record carried `id`.
    fn delete(&self, id: StoreId) -> Result<bool, RepositoryError>;
}

impl<R> StoreRepository for Arc<R>
where
    R: StoreRepository + ?Sized,
{
    fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        (**self).list()
    }

    fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        (**self).get(id)
    }

    fn save(&self, store: Store) -> Result<Store, RepositoryError> {
        (**self).save(store)
    }

    fn delete(&self, id: StoreId) -> Result<bool, RepositoryError> {
        (**self).delete(id)
    }
}
