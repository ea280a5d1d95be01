//! Warehouse use cases: validate, then perform at most one store mutation.
//!
//! Validator and store errors propagate to the caller unchanged. Downstream
//! notifications after a successful mutation are the caller's concern.

pub mod archive;
pub mod create;
pub mod replace;

pub use archive::ArchiveWarehouseUseCase;
pub use create::CreateWarehouseUseCase;
pub use replace::ReplaceWarehouseUseCase;
