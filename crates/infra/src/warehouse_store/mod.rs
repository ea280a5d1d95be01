//! Warehouse store adapters.
//!
//! Both adapters enforce uniqueness of the business unit code themselves; the
//! validator's duplicate check only rejects early.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryWarehouseStore;
pub use postgres::PostgresWarehouseStore;
