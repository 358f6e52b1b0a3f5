//! Status command - report which steps are satisfied without applying them.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::TableDescriptor;
use crate::errors::AppResult;
use crate::infra::{CatalogStore, Database};
use crate::services::MigrationRunner;

/// Execute the status command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Checking bootstrap status...");

    let db = Database::connect(&config).await?;
    let runner = MigrationRunner::new(
        Arc::new(CatalogStore::new(db.shared_connection())),
        TableDescriptor::customers(config.schema.as_str()),
        config.replication_role.as_str(),
    );

    let checks = runner.inspect().await?;
    drop(runner);
    db.close().await?;

    println!("Bootstrap status for {}", config.target());
    for check in &checks {
        println!("{}", check);
    }

    let pending = checks.iter().filter(|c| !c.satisfied).count();
    if pending == 0 {
        println!("\nNothing to do.");
    } else {
        println!("\n{} step(s) pending, run `cdc-db-setup run` to apply.", pending);
    }

    Ok(())
}
