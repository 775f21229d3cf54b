pub mod app_config;
pub mod catalog_repo;
pub mod memory;
pub mod order_repo;

pub use catalog_repo::PgCatalogLookup;
pub use memory::{LogNotifier, MemoryCatalog, MemoryOrderStore, RecordingNotifier};
pub use order_repo::PgOrderStore;
