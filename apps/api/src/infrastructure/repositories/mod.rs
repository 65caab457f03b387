pub mod memory_catalog_store;
pub mod sqlx_catalog_store;
