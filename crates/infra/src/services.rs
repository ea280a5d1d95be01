//! Service wiring: picks adapters from [`InfraConfig`] and assembles the use
//! cases on top of them.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use fulfilment_stores::StoreService;
use fulfilment_warehouses::{
    ArchiveWarehouseOperation, ArchiveWarehouseUseCase, CreateWarehouseOperation,
    CreateWarehouseUseCase, DefaultWarehouseValidator, LocationResolver,
    ReplaceWarehouseOperation, ReplaceWarehouseUseCase, WarehouseStore,
};

use crate::config::InfraConfig;
use crate::legacy::TracingLegacyGateway;
use crate::locations::StaticLocationCatalogue;
use crate::store_repository::InMemoryStoreRepository;
use crate::warehouse_store::in_memory::InMemoryWarehouseStore;
use crate::warehouse_store::postgres::PostgresWarehouseStore;

pub type SharedWarehouseStore = Arc<dyn WarehouseStore>;
pub type SharedLocationResolver = Arc<dyn LocationResolver>;
pub type SharedValidator = Arc<DefaultWarehouseValidator<SharedWarehouseStore, SharedLocationResolver>>;
pub type WiredStoreService = StoreService<Arc<InMemoryStoreRepository>, TracingLegacyGateway>;

#[derive(Clone)]
pub struct WarehouseServices {
    pub store: SharedWarehouseStore,
    pub locations: SharedLocationResolver,
    pub create: Arc<dyn CreateWarehouseOperation>,
    pub replace: Arc<dyn ReplaceWarehouseOperation>,
    pub archive: Arc<dyn ArchiveWarehouseOperation>,
}

impl WarehouseServices {
    /// Assemble the three use cases over one store and one catalogue.
    pub fn wire(store: SharedWarehouseStore, locations: SharedLocationResolver) -> Self {
        let validator: SharedValidator =
            Arc::new(DefaultWarehouseValidator::new(store.clone(), locations.clone()));

        Self {
            create: Arc::new(CreateWarehouseUseCase::new(store.clone(), validator.clone())),
            replace: Arc::new(ReplaceWarehouseUseCase::new(store.clone(), validator.clone())),
            archive: Arc::new(ArchiveWarehouseUseCase::new(store.clone(), validator)),
            store,
            locations,
        }
    }
}

#[derive(Clone)]
pub struct FulfilmentServices {
    pub warehouses: WarehouseServices,
    pub stores: Arc<WiredStoreService>,
}

/// Process entry point: read the environment, install tracing, wire services.
pub fn bootstrap() -> anyhow::Result<FulfilmentServices> {
    let config = InfraConfig::from_env()?;
    fulfilment_observability::init_with(config.log_format);
    info!(persistent = config.use_persistent_stores, "starting fulfilment services");
    build_services(&config)
}

pub fn build_services(config: &InfraConfig) -> anyhow::Result<FulfilmentServices> {
    Ok(FulfilmentServices {
        warehouses: build_warehouse_services(config)?,
        stores: Arc::new(build_store_service()),
    })
}

/// Postgres when `use_persistent_stores` is set, in-memory otherwise.
///
/// The persistent store bridges onto the ambient tokio runtime, so this must be
/// called from inside a multi-threaded runtime in that mode.
pub fn build_warehouse_services(config: &InfraConfig) -> anyhow::Result<WarehouseServices> {
    let locations: SharedLocationResolver = Arc::new(build_location_catalogue(config)?);

    let store: SharedWarehouseStore = if config.use_persistent_stores {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
        tokio::runtime::Handle::try_current()
            .context("the postgres warehouse store must be built inside a tokio runtime")?;
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .context("invalid DATABASE_URL")?;

        let store = PostgresWarehouseStore::new(pool);
        store
            .ensure_schema()
            .context("failed to prepare warehouse schema")?;
        info!("using postgres warehouse store");
        Arc::new(store)
    } else {
        info!("using in-memory warehouse store");
        Arc::new(InMemoryWarehouseStore::new())
    };

    Ok(WarehouseServices::wire(store, locations))
}

pub fn build_store_service() -> WiredStoreService {
    StoreService::new(Arc::new(InMemoryStoreRepository::new()), TracingLegacyGateway)
}

fn build_location_catalogue(config: &InfraConfig) -> anyhow::Result<StaticLocationCatalogue> {
    let catalogue = match &config.locations_file {
        Some(path) => StaticLocationCatalogue::from_file(path)?,
        None => StaticLocationCatalogue::with_default_locations(),
    };
    info!(locations = catalogue.site_count(), "location catalogue loaded");
    Ok(catalogue)
}
