//! Postgres-backed warehouse store.
//!
//! The warehouse ports are synchronous; every query is driven to completion on
//! the current tokio runtime with `block_in_place`, so this adapter must be used
//! from inside a multi-threaded runtime. Calls made anywhere else fail with
//! [`WarehouseStoreError::Backend`].

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, error, warn};
use uuid::Uuid;

use fulfilment_core::WarehouseId;
use fulfilment_warehouses::{StoreResult, Warehouse, WarehouseStore, WarehouseStoreError};

/// Table definition used by [`PostgresWarehouseStore::ensure_schema`].
///
/// The `UNIQUE` constraint on `business_unit_code` is the authoritative
/// duplicate guard under concurrent creates.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS warehouse (
    id                 UUID PRIMARY KEY,
    business_unit_code TEXT NOT NULL UNIQUE,
    location           TEXT NOT NULL,
    capacity           BIGINT NOT NULL CHECK (capacity >= 0),
    stock              BIGINT NOT NULL CHECK (stock >= 0),
    created_at         TIMESTAMPTZ NOT NULL,
    archived_at        TIMESTAMPTZ
);
CREATE INDEX IF NOT EXISTS warehouse_location_idx ON warehouse (location);
"#;

const COLUMNS: &str = "id, business_unit_code, location, capacity, stock, created_at, archived_at";

pub struct PostgresWarehouseStore {
    pool: PgPool,
}

impl PostgresWarehouseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `warehouse` table and its location index when missing.
    pub fn ensure_schema(&self) -> StoreResult<()> {
        self.run("ensure_warehouse_schema", async {
            sqlx::raw_sql(SCHEMA).execute(&self.pool).await.map(|_| ())
        })
    }

    fn block_on<T, F>(&self, query: F) -> StoreResult<Result<T, sqlx::Error>>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let handle = Handle::try_current()
            .map_err(|e| WarehouseStoreError::Backend(format!("no tokio runtime: {e}")))?;
        if handle.runtime_flavor() != RuntimeFlavor::MultiThread {
            return Err(WarehouseStoreError::Backend(
                "postgres store requires a multi-threaded runtime".to_string(),
            ));
        }
        Ok(tokio::task::block_in_place(|| handle.block_on(query)))
    }

    fn run<T, F>(&self, operation: &'static str, query: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        debug!(operation, "running warehouse query");
        self.block_on(query)?.map_err(|e| {
            error!(operation, error = %e, "warehouse query failed");
            WarehouseStoreError::Backend(e.to_string())
        })
    }
}

fn to_column(value: u32) -> i64 {
    i64::from(value)
}

fn from_column(row: &PgRow, column: &str) -> Result<u32, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn warehouse_from_row(row: &PgRow) -> Result<Warehouse, sqlx::Error> {
    Ok(Warehouse {
        id: Some(WarehouseId::from_uuid(row.try_get::<Uuid, _>("id")?)),
        business_unit_code: row.try_get("business_unit_code")?,
        location: row.try_get("location")?,
        capacity: from_column(row, "capacity")?,
        stock: from_column(row, "stock")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        archived_at: row.try_get::<Option<DateTime<Utc>>, _>("archived_at")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Map a failed INSERT/UPDATE, reporting the unique constraint on the business
/// unit code the same way the in-memory store does.
fn write_error(operation: &'static str, code: &str, err: sqlx::Error) -> WarehouseStoreError {
    if is_unique_violation(&err) {
        warn!(operation, business_unit_code = %code, "duplicate business unit code rejected");
        return WarehouseStoreError::DuplicateBusinessUnitCode(code.to_string());
    }
    error!(operation, error = %err, "warehouse write failed");
    WarehouseStoreError::Backend(err.to_string())
}

impl WarehouseStore for PostgresWarehouseStore {
    fn list_all(&self) -> StoreResult<Vec<Warehouse>> {
        self.run("list_warehouses", async {
            let rows = sqlx::query(&format!(
                "SELECT {COLUMNS} FROM warehouse ORDER BY created_at"
            ))
            .fetch_all(&self.pool)
            .await?;
            rows.iter().map(warehouse_from_row).collect()
        })
    }

    fn create(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        let id = WarehouseId::new();
        let created = warehouse.with_id(id);

        let result = self.block_on(
            sqlx::query(&format!(
                "INSERT INTO warehouse ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
            ))
            .bind(id.as_uuid())
            .bind(&created.business_unit_code)
            .bind(&created.location)
            .bind(to_column(created.capacity))
            .bind(to_column(created.stock))
            .bind(created.created_at)
            .bind(created.archived_at)
            .execute(&self.pool),
        )?;

        result
            .map(|_| created.clone())
            .map_err(|e| write_error("create_warehouse", &created.business_unit_code, e))
    }

    fn update(&self, warehouse: Warehouse) -> StoreResult<Warehouse> {
        let id = warehouse.id.ok_or(WarehouseStoreError::MissingId("update"))?;

        let affected = self
            .block_on(
                sqlx::query(
                    r#"
                    UPDATE warehouse SET
                        business_unit_code = $2,
                        location = $3,
                        capacity = $4,
                        stock = $5,
                        created_at = $6,
                        archived_at = $7
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_uuid())
                .bind(&warehouse.business_unit_code)
                .bind(&warehouse.location)
                .bind(to_column(warehouse.capacity))
                .bind(to_column(warehouse.stock))
                .bind(warehouse.created_at)
                .bind(warehouse.archived_at)
                .execute(&self.pool),
            )?
            .map(|done| done.rows_affected())
            .map_err(|e| write_error("update_warehouse", &warehouse.business_unit_code, e))?;

        if affected == 0 {
            warn!(warehouse_id = %id, "update matched no warehouse");
            return Err(WarehouseStoreError::NotFound(id));
        }
        Ok(warehouse)
    }

    fn find_by_id(&self, id: WarehouseId) -> StoreResult<Option<Warehouse>> {
        self.run("find_warehouse_by_id", async {
            sqlx::query(&format!("SELECT {COLUMNS} FROM warehouse WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?
                .as_ref()
                .map(warehouse_from_row)
                .transpose()
        })
    }

    fn find_by_business_unit_code(&self, code: &str) -> StoreResult<Option<Warehouse>> {
        self.run("find_warehouse_by_business_unit_code", async {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM warehouse WHERE business_unit_code = $1"
            ))
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(warehouse_from_row)
            .transpose()
        })
    }

    fn exists_by_business_unit_code(&self, code: &str) -> StoreResult<bool> {
        self.run("exists_warehouse_by_business_unit_code", async {
            sqlx::query("SELECT EXISTS (SELECT 1 FROM warehouse WHERE business_unit_code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?
                .try_get::<bool, _>(0)
        })
    }

    fn count_by_location(&self, location: &str) -> StoreResult<u32> {
        let count = self.run("count_warehouses_by_location", async {
            sqlx::query("SELECT COUNT(*) FROM warehouse WHERE location = $1")
                .bind(location)
                .fetch_one(&self.pool)
                .await?
                .try_get::<i64, _>(0)
        })?;
        u32::try_from(count)
            .map_err(|_| WarehouseStoreError::Backend(format!("count overflow at {location}")))
    }

    fn remove(&self, id: WarehouseId) -> StoreResult<()> {
        let affected = self.run("remove_warehouse", async {
            sqlx::query("DELETE FROM warehouse WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map(|done| done.rows_affected())
        })?;

        if affected == 0 {
            return Err(WarehouseStoreError::NotFound(id));
        }
        Ok(())
    }
}
