//! CDC database setup - idempotent PostgreSQL bootstrap for change data capture.
//!
//! Prepares a database so a change-capture connector can stream full row
//! images from it. Every run re-inspects the live catalog and only applies
//! what is missing, so the tool is safe to run on every environment stand-up.
//!
//! # Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Connection settings and defaults
//! - **domain**: Table descriptor, replica identity and step outcomes
//! - **services**: The migration runner (check-then-act steps)
//! - **infra**: Database connection and catalog access
//! - **utils**: SQL identifier helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Apply all steps
//! cargo run -- run
//!
//! # Inspect without changing anything
//! cargo run -- status
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{ReplicaIdentity, Step, StepOutcome, StepReport, TableDescriptor};
pub use errors::{AppError, AppResult};
pub use infra::{CatalogRepository, CatalogStore, Database};
pub use services::MigrationRunner;
