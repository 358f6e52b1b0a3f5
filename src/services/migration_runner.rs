//! Migration runner - the three check-then-act bootstrap steps.
//!
//! Every run starts from scratch: each step inspects the live catalog,
//! applies its change only when needed, and commits on its own. Steps run
//! strictly in order over one connection. There is no version ledger and no
//! locking, so two concurrent runs can race the existence checks.

use std::sync::Arc;

use crate::domain::{Step, StepCheck, StepOutcome, StepReport, TableDescriptor};
use crate::errors::{AppError, AppResult, StepContext};
use crate::infra::CatalogRepository;

/// Runs the bootstrap steps against a catalog.
pub struct MigrationRunner<C: CatalogRepository> {
    catalog: Arc<C>,
    table: TableDescriptor,
    replication_role: String,
}

impl<C: CatalogRepository> MigrationRunner<C> {
    pub fn new(catalog: Arc<C>, table: TableDescriptor, replication_role: impl Into<String>) -> Self {
        Self {
            catalog,
            table,
            replication_role: replication_role.into(),
        }
    }

    /// Run all steps in order, handing each report to `on_step` as soon as
    /// the step finishes.
    ///
    /// # Errors
    /// Stops at the first failing step and returns a
    /// [`AppError::SchemaOperation`] naming it. A refused replication grant
    /// is not an error.
    pub async fn run<F>(&self, mut on_step: F) -> AppResult<Vec<StepReport>>
    where
        F: FnMut(&StepReport),
    {
        let mut reports = Vec::with_capacity(Step::ALL.len());

        for step in Step::ALL {
            let report = self.run_step(step).await.in_step(step)?;
            tracing::debug!(step = %step, outcome = ?report.outcome, "Step finished");
            on_step(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    /// Run a single step.
    pub async fn run_step(&self, step: Step) -> AppResult<StepReport> {
        match step {
            Step::EnsureTable => self.ensure_table().await,
            Step::EnsureReplicaIdentity => self.ensure_replica_identity().await,
            Step::EnsureReplicationRole => self.ensure_replication_role().await,
        }
    }

    /// Step A: create the table when it is missing.
    pub async fn ensure_table(&self) -> AppResult<StepReport> {
        let step = Step::EnsureTable;
        let name = &self.table.name;

        if self.catalog.table_exists(&self.table.schema, name).await? {
            return Ok(StepReport::new(
                step,
                StepOutcome::AlreadySatisfied,
                format!("Table '{}' already exists", name),
            ));
        }

        self.catalog.create_table(&self.table).await?;
        Ok(StepReport::new(
            step,
            StepOutcome::Applied,
            format!("Created '{}' table", name),
        ))
    }

    /// Step B: switch the table to `REPLICA IDENTITY FULL`.
    pub async fn ensure_replica_identity(&self) -> AppResult<StepReport> {
        let step = Step::EnsureReplicaIdentity;
        let name = &self.table.name;

        let current = self
            .catalog
            .replica_identity(&self.table.schema, name)
            .await?
            .ok_or_else(|| {
                AppError::catalog(format!(
                    "table '{}.{}' not found in pg_class",
                    self.table.schema, name
                ))
            })?;

        if current.is_full() {
            return Ok(StepReport::new(
                step,
                StepOutcome::AlreadySatisfied,
                "REPLICA IDENTITY already set to FULL",
            ));
        }

        self.catalog
            .set_replica_identity_full(&self.table.schema, name)
            .await?;
        Ok(StepReport::new(
            step,
            StepOutcome::Applied,
            format!(
                "Set REPLICA IDENTITY to FULL for '{}' table (was {})",
                name, current
            ),
        ))
    }

    /// Step C: grant the replication attribute to the CDC role.
    ///
    /// The role itself is never created. A missing role or a refused grant
    /// is reported as a warning.
    pub async fn ensure_replication_role(&self) -> AppResult<StepReport> {
        let step = Step::EnsureReplicationRole;
        let role_name = &self.replication_role;

        let Some(role) = self.catalog.find_role(role_name).await? else {
            return Ok(StepReport::new(
                step,
                StepOutcome::SkippedWithWarning {
                    reason: "role does not exist".to_string(),
                },
                format!(
                    "Replication user '{}' does not exist (this is OK if using docker-compose defaults)",
                    role_name
                ),
            ));
        };

        if role.can_replicate {
            return Ok(StepReport::new(
                step,
                StepOutcome::AlreadySatisfied,
                format!("Replication user '{}' already has replication privileges", role_name),
            ));
        }

        match self.catalog.grant_replication(role_name).await {
            Ok(()) => Ok(StepReport::new(
                step,
                StepOutcome::Applied,
                format!(
                    "Replication user '{}' exists and has replication privileges",
                    role_name
                ),
            )),
            Err(e) => {
                tracing::warn!(role = %role_name, error = %e, "Replication grant refused");
                Ok(StepReport::new(
                    step,
                    StepOutcome::SkippedWithWarning {
                        reason: e.to_string(),
                    },
                    format!("Replication user '{}' exists (privileges check: {})", role_name, e),
                ))
            }
        }
    }

    /// Inspect every step without changing anything.
    pub async fn inspect(&self) -> AppResult<Vec<StepCheck>> {
        let schema = &self.table.schema;
        let name = &self.table.name;
        let mut checks = Vec::with_capacity(Step::ALL.len());

        let table_exists = self
            .catalog
            .table_exists(schema, name)
            .await
            .in_step(Step::EnsureTable)?;
        checks.push(StepCheck {
            step: Step::EnsureTable,
            satisfied: table_exists,
            detail: if table_exists {
                format!("table '{}.{}' exists", schema, name)
            } else {
                format!("table '{}.{}' will be created", schema, name)
            },
        });

        let identity_check = if table_exists {
            let current = self
                .catalog
                .replica_identity(schema, name)
                .await
                .in_step(Step::EnsureReplicaIdentity)?;
            match current {
                Some(identity) if identity.is_full() => StepCheck {
                    step: Step::EnsureReplicaIdentity,
                    satisfied: true,
                    detail: "REPLICA IDENTITY is FULL".to_string(),
                },
                Some(identity) => StepCheck {
                    step: Step::EnsureReplicaIdentity,
                    satisfied: false,
                    detail: format!("REPLICA IDENTITY is {}, will be set to FULL", identity),
                },
                None => StepCheck {
                    step: Step::EnsureReplicaIdentity,
                    satisfied: false,
                    detail: "table not visible in pg_class".to_string(),
                },
            }
        } else {
            StepCheck {
                step: Step::EnsureReplicaIdentity,
                satisfied: false,
                detail: "will be set to FULL after the table is created".to_string(),
            }
        };
        checks.push(identity_check);

        let role_name = &self.replication_role;
        let role = self
            .catalog
            .find_role(role_name)
            .await
            .in_step(Step::EnsureReplicationRole)?;
        checks.push(match role {
            Some(role) if role.can_replicate => StepCheck {
                step: Step::EnsureReplicationRole,
                satisfied: true,
                detail: format!("role '{}' has REPLICATION", role_name),
            },
            Some(_) => StepCheck {
                step: Step::EnsureReplicationRole,
                satisfied: false,
                detail: format!("role '{}' lacks REPLICATION, will be granted", role_name),
            },
            None => StepCheck {
                step: Step::EnsureReplicationRole,
                satisfied: false,
                detail: format!("role '{}' does not exist (not managed by this tool)", role_name),
            },
        });

        Ok(checks)
    }
}
