//! Downstream legacy store manager.
//!
//! The store service calls the gateway only after the repository write has
//! succeeded. Delivery is at-least-once: a failed call leaves the local write in
//! place and surfaces the failure, so the caller may retry the notification.

use std::sync::Arc;

use crate::error::LegacySyncError;
use crate::store::Store;

pub trait LegacyStoreGateway: Send + Sync {
    fn create_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError>;

    fn update_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError>;
}

impl<G> LegacyStoreGateway for Arc<G>
where
    G: LegacyStoreGateway + ?Sized,
{
    fn create_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError> {
        (**self).create_store_on_legacy_system(store)
    }

    fn update_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError> {
        (**self).update_store_on_legacy_system(store)
    }
}
