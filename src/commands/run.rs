//! Run command - apply the bootstrap steps.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{StepOutcome, TableDescriptor};
use crate::errors::AppResult;
use crate::infra::{CatalogStore, Database};
use crate::services::MigrationRunner;

/// Execute the run command
pub async fn execute(config: Config) -> AppResult<()> {
    println!("Starting database migrations...");
    println!("Connecting to {}", config.target());

    let db = Database::connect(&config).await?;
    println!("✓ Connected to database");

    let catalog = Arc::new(CatalogStore::new(db.shared_connection()));
    let runner = MigrationRunner::new(
        catalog,
        TableDescriptor::customers(config.schema.as_str()),
        config.replication_role.as_str(),
    );

    let reports = runner.run(|report| println!("{}", report)).await?;
    drop(runner);
    db.close().await?;

    let applied = reports
        .iter()
        .filter(|r| r.outcome == StepOutcome::Applied)
        .count();
    let warnings = reports.iter().filter(|r| r.outcome.is_warning()).count();
    tracing::info!(applied, warnings, "Migrations finished");

    println!("\n✅ All migrations completed successfully!");
    Ok(())
}
