//! `fulfilment-core`: shared domain primitives.
//!
//! This crate contains **pure domain** building blocks used by the warehouse
//! and store modules (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{StoreId, WarehouseId};
pub use value_object::ValueObject;
