//! Catalog access for the bootstrap steps.
//!
//! Existence checks read `information_schema` and `pg_catalog`; every
//! mutating statement runs on its own and auto-commits.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::prelude::*;

use crate::domain::{ColumnKind, ReplicaIdentity, ReplicationRole, TableDescriptor};
use crate::errors::{AppError, AppResult};
use crate::utils::identifier;

#[cfg(test)]
use mockall::automock;

const TABLE_EXISTS_SQL: &str = r#"SELECT EXISTS (
    SELECT FROM information_schema.tables
    WHERE table_schema = $1
    AND table_name = $2
) AS "exists""#;

// relreplident is the internal "char" type, which the driver cannot decode as text
const REPLICA_IDENTITY_SQL: &str = r#"SELECT c.relreplident::text AS relreplident
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE n.nspname = $1
AND c.relname = $2"#;

const FIND_ROLE_SQL: &str = r#"SELECT usename::text AS usename, userepl
FROM pg_catalog.pg_user
WHERE usename = $1"#;

/// Catalog operations used by the migration runner.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Whether `schema.table` exists
    async fn table_exists(&self, schema: &str, table: &str) -> AppResult<bool>;

    /// Create the table from its descriptor (no IF NOT EXISTS)
    async fn create_table(&self, table: &TableDescriptor) -> AppResult<()>;

    /// Current replica identity, `None` when the relation is not in `pg_class`
    async fn replica_identity(&self, schema: &str, table: &str)
        -> AppResult<Option<ReplicaIdentity>>;

    /// `ALTER TABLE ... REPLICA IDENTITY FULL`
    async fn set_replica_identity_full(&self, schema: &str, table: &str) -> AppResult<()>;

    /// Look up a login role, `None` when it does not exist
    async fn find_role(&self, name: &str) -> AppResult<Option<ReplicationRole>>;

    /// `ALTER USER ... WITH REPLICATION`
    async fn grant_replication(&self, name: &str) -> AppResult<()>;
}

/// PostgreSQL implementation of CatalogRepository
pub struct CatalogStore {
    db: Arc<DatabaseConnection>,
}

impl CatalogStore {
    /// Create new catalog instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn statement(&self, sql: &str, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    async fn execute_ddl(&self, sql: String) -> AppResult<()> {
        tracing::debug!(%sql, "Executing DDL");
        self.db
            .execute(Statement::from_string(DbBackend::Postgres, sql))
            .await?;
        Ok(())
    }
}

/// Build the CREATE TABLE statement for a descriptor.
pub fn create_table_statement(table: &TableDescriptor) -> TableCreateStatement {
    let mut stmt = Table::create();
    stmt.table((
        Alias::new(table.schema.as_str()),
        Alias::new(table.name.as_str()),
    ));

    for column in &table.columns {
        let mut def = ColumnDef::new(Alias::new(column.name.as_str()));
        match column.kind {
            ColumnKind::SerialPrimaryKey => {
                def.integer().not_null().auto_increment().primary_key();
            }
            ColumnKind::VarChar(len) => {
                def.string_len(len).null();
            }
        }
        stmt.col(&mut def);
    }

    stmt.to_owned()
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn table_exists(&self, schema: &str, table: &str) -> AppResult<bool> {
        let row = self
            .db
            .query_one(self.statement(TABLE_EXISTS_SQL, vec![schema.into(), table.into()]))
            .await?
            .ok_or_else(|| AppError::catalog("existence check returned no row"))?;

        let exists: bool = row.try_get("", "exists")?;
        tracing::debug!(schema, table, exists, "Checked table existence");
        Ok(exists)
    }

    async fn create_table(&self, table: &TableDescriptor) -> AppResult<()> {
        tracing::debug!(table = %table.quoted_name(), "Creating table");
        let manager = SchemaManager::new(self.db.as_ref());
        manager.create_table(create_table_statement(table)).await?;
        Ok(())
    }

    async fn replica_identity(
        &self,
        schema: &str,
        table: &str,
    ) -> AppResult<Option<ReplicaIdentity>> {
        let row = self
            .db
            .query_one(self.statement(REPLICA_IDENTITY_SQL, vec![schema.into(), table.into()]))
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let code: String = row.try_get("", "relreplident")?;
        tracing::debug!(schema, table, %code, "Read replica identity");
        ReplicaIdentity::from_code(&code)
            .map(Some)
            .ok_or_else(|| AppError::catalog(format!("unknown relreplident code '{}'", code)))
    }

    async fn set_replica_identity_full(&self, schema: &str, table: &str) -> AppResult<()> {
        self.execute_ddl(format!(
            "ALTER TABLE {} REPLICA IDENTITY FULL",
            identifier::quote_qualified(schema, table)
        ))
        .await
    }

    async fn find_role(&self, name: &str) -> AppResult<Option<ReplicationRole>> {
        let row = self
            .db
            .query_one(self.statement(FIND_ROLE_SQL, vec![name.into()]))
            .await?;

        match row {
            Some(row) => Ok(Some(ReplicationRole {
                name: row.try_get("", "usename")?,
                can_replicate: row.try_get("", "userepl")?,
            })),
            None => Ok(None),
        }
    }

    async fn grant_replication(&self, name: &str) -> AppResult<()> {
        self.execute_ddl(format!("ALTER USER {} WITH REPLICATION", identifier::quote(name)))
            .await
    }
}
