//! Services layer - Application use cases.
//!
//! Orchestrates the catalog operations into the bootstrap steps.

mod migration_runner;

pub use migration_runner::MigrationRunner;
