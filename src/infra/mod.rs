//! Infrastructure layer - External systems integration
//!
//! - Database connection management
//! - Catalog access (existence checks and DDL)

pub mod catalog;
pub mod db;

pub use catalog::{CatalogRepository, CatalogStore};
pub use db::Database;

#[cfg(test)]
pub use catalog::MockCatalogRepository;
