//! Legacy store manager adapter.

use serde::Serialize;
use tracing::info;

use fulfilment_core::StoreId;
use fulfilment_stores::{LegacyStoreGateway, LegacySyncError, Store};

#[derive(Debug, Serialize)]
struct LegacyStorePayload<'a> {
    action: &'static str,
    id: StoreId,
    name: &'a str,
    items_on_stock: i32,
}

impl<'a> LegacyStorePayload<'a> {
    fn new(action: &'static str, store: &'a Store) -> Self {
        Self {
            action,
            id: store.id,
            name: &store.name,
            items_on_stock: store.quantity_products_in_stock,
        }
    }
}

/// Hands store changes to the legacy store manager as JSON records emitted on
/// the `legacy_sync` tracing target, where the log shipper forwards them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLegacyGateway;

impl TracingLegacyGateway {
    fn send(&self, payload: LegacyStorePayload<'_>) -> Result<(), LegacySyncError> {
        let json = serde_json::to_string(&payload).map_err(|e| LegacySyncError(e.to_string()))?;
        info!(target: "legacy_sync", store_id = %payload.id, payload = %json, "store sent to legacy system");
        Ok(())
    }
}

impl LegacyStoreGateway for TracingLegacyGateway {
    fn create_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError> {
        self.send(LegacyStorePayload::new("created", store))
    }

    fn update_store_on_legacy_system(&self, store: &Store) -> Result<(), LegacySyncError> {
        self.send(LegacyStorePayload::new("updated", store))
    }
}
