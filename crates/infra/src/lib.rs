//! Infrastructure layer: store adapters, location catalogue, legacy gateway,
//! configuration and service wiring.

pub mod config;
pub mod legacy;
pub mod locations;
pub mod services;
pub mod store_repository;
pub mod warehouse_store;
