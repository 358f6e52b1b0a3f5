//! Catalog store tests.
//!
//! These tests run the PostgreSQL catalog against SeaORM's mock connection,
//! so they check the statements issued without needing a live database.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::sea_query::PostgresQueryBuilder;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction, Value,
};

use cdc_db_setup::domain::{ReplicaIdentity, StepOutcome, TableDescriptor};
use cdc_db_setup::errors::AppError;
use cdc_db_setup::infra::catalog::create_table_statement;
use cdc_db_setup::infra::{CatalogRepository, CatalogStore};
use cdc_db_setup::services::MigrationRunner;

// =============================================================================
// Helpers
// =============================================================================

fn row(pairs: &[(&'static str, Value)]) -> BTreeMap<&'static str, Value> {
    pairs.iter().cloned().collect()
}

fn no_rows() -> Vec<BTreeMap<&'static str, Value>> {
    Vec::new()
}

fn exec_ok() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 0,
    }
}

/// Mock connections are not `Clone`, so tests share them through an `Arc`.
fn shared(db: DatabaseConnection) -> Arc<DatabaseConnection> {
    Arc::new(db)
}

/// Take the connection back once every store holding it has been dropped.
fn into_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::try_unwrap(db)
        .ok()
        .expect("connection still shared")
        .into_transaction_log()
}

/// Every SQL string the mock connection saw, in order.
fn executed_sql(db: Arc<DatabaseConnection>) -> Vec<String> {
    into_log(db)
        .iter()
        .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
        .collect()
}

// =============================================================================
// Statement building
// =============================================================================

#[test]
fn test_create_table_statement_renders_customers() {
    let sql = create_table_statement(&TableDescriptor::customers("public")).to_string(PostgresQueryBuilder);

    assert!(sql.starts_with(r#"CREATE TABLE "public"."customers""#));
    assert!(!sql.contains("IF NOT EXISTS"));
    assert!(sql.contains(r#""id" serial"#));
    assert!(sql.contains("PRIMARY KEY"));
    assert!(sql.contains(r#""name" varchar(255)"#));
    assert!(sql.contains(r#""email" varchar(255)"#));
}

// =============================================================================
// Catalog queries
// =============================================================================

#[tokio::test]
async fn test_table_exists_binds_schema_and_name() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&[("exists", Value::from(true))])]])
            .into_connection(),
    );
    let store = CatalogStore::new(db.clone());

    assert!(store.table_exists("public", "customers").await.unwrap());

    drop(store);
    let log = into_log(db);
    assert_eq!(log.len(), 1);
    let stmt = &log[0].statements()[0];
    assert!(stmt.sql.contains("information_schema.tables"));
    assert_eq!(
        stmt.values.as_ref().map(|v| v.0.clone()),
        Some(vec![Value::from("public"), Value::from("customers")])
    );
}

#[tokio::test]
async fn test_replica_identity_reads_catalog_code() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&[("relreplident", Value::from("d"))])]])
            .into_connection(),
    );
    let store = CatalogStore::new(db);

    let identity = store.replica_identity("public", "customers").await.unwrap();
    assert_eq!(identity, Some(ReplicaIdentity::Default));
}

#[tokio::test]
async fn test_replica_identity_missing_relation() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([no_rows()])
            .into_connection(),
    );
    let store = CatalogStore::new(db);

    let identity = store.replica_identity("public", "customers").await.unwrap();
    assert_eq!(identity, None);
}

#[tokio::test]
async fn test_replica_identity_unknown_code_is_catalog_error() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&[("relreplident", Value::from("z"))])]])
            .into_connection(),
    );
    let store = CatalogStore::new(db);

    let result = store.replica_identity("public", "customers").await;
    assert!(matches!(result, Err(AppError::Catalog(_))));
}

#[tokio::test]
async fn test_find_role_maps_replication_flag() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&[
                ("usename", Value::from("dbz")),
                ("userepl", Value::from(false)),
            ])]])
            .append_query_results([no_rows()])
            .into_connection(),
    );
    let store = CatalogStore::new(db);

    let role = store.find_role("dbz").await.unwrap().unwrap();
    assert_eq!(role.name, "dbz");
    assert!(!role.can_replicate);

    assert!(store.find_role("nobody").await.unwrap().is_none());
}

// =============================================================================
// DDL
// =============================================================================

#[tokio::test]
async fn test_ddl_statements_quote_identifiers() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(), exec_ok()])
            .into_connection(),
    );
    let store = CatalogStore::new(db.clone());

    store
        .set_replica_identity_full("public", "customers")
        .await
        .unwrap();
    store.grant_replication("dbz").await.unwrap();

    drop(store);
    assert_eq!(
        executed_sql(db),
        vec![
            r#"ALTER TABLE "public"."customers" REPLICA IDENTITY FULL"#.to_string(),
            r#"ALTER USER "dbz" WITH REPLICATION"#.to_string(),
        ]
    );
}

// =============================================================================
// Full run over the mock connection
// =============================================================================

#[tokio::test]
async fn test_empty_database_scenario() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                // table exists?
                vec![row(&[("exists", Value::from(false))])],
            ])
            .append_query_results([
                // replica identity of the new table
                vec![row(&[("relreplident", Value::from("d"))])],
            ])
            .append_query_results([
                // role lookup
                vec![row(&[
                    ("usename", Value::from("dbz")),
                    ("userepl", Value::from(false)),
                ])],
            ])
            .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
            .into_connection(),
    );

    let runner = MigrationRunner::new(
        Arc::new(CatalogStore::new(db.clone())),
        TableDescriptor::customers("public"),
        "dbz",
    );
    let reports = runner.run(|_| {}).await.unwrap();
    drop(runner);

    assert!(reports.iter().all(|r| r.outcome == StepOutcome::Applied));

    let sql = executed_sql(db);
    assert_eq!(sql.len(), 6);
    assert!(sql[0].contains("information_schema.tables"));
    assert!(sql[1].starts_with(r#"CREATE TABLE "public"."customers""#));
    assert!(sql[2].contains("relreplident"));
    assert!(sql[3].ends_with("REPLICA IDENTITY FULL"));
    assert!(sql[4].contains("pg_catalog.pg_user"));
    assert_eq!(sql[5], r#"ALTER USER "dbz" WITH REPLICATION"#);
}

#[tokio::test]
async fn test_fully_configured_database_issues_no_ddl() {
    let db = shared(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&[("exists", Value::from(true))])]])
            .append_query_results([vec![row(&[("relreplident", Value::from("f"))])]])
            .append_query_results([vec![row(&[
                ("usename", Value::from("dbz")),
                ("userepl", Value::from(true)),
            ])]])
            .into_connection(),
    );

    let runner = MigrationRunner::new(
        Arc::new(CatalogStore::new(db.clone())),
        TableDescriptor::customers("public"),
        "dbz",
    );
    let reports = runner.run(|_| {}).await.unwrap();
    drop(runner);

    assert!(reports
        .iter()
        .all(|r| r.outcome == StepOutcome::AlreadySatisfied));
    let sql = executed_sql(db);
    assert_eq!(sql.len(), 3);
    assert!(sql.iter().all(|s| s.trim_start().starts_with("SELECT")));
}
