//! Database connection and initialization.

use std::sync::Arc;

use sea_orm::sqlx::postgres::PgPoolOptions;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlxPostgresConnector, Statement};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Database wrapper for connection management
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the single connection used for the whole run.
    ///
    /// The connection is pinged before returning, so an unreachable server
    /// fails here and no step ever issues SQL against it.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut pool = PgPoolOptions::new().max_connections(1).min_connections(1);
        if let Some(timeout) = config.connect_timeout {
            pool = pool.acquire_timeout(timeout);
        }

        tracing::debug!(db = %config.target(), "Connecting to database");
        let pool = pool
            .connect_with(config.connect_options())
            .await
            .map_err(|e| AppError::connection(config.target(), e))?;

        let db = Self::from_connection(SqlxPostgresConnector::from_sqlx_postgres_pool(pool));
        db.ping()
            .await
            .map_err(|e| AppError::connection(config.target(), e))?;
        tracing::debug!(db = %config.target(), "Database connected");

        Ok(db)
    }

    /// Wrap an already open connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Handle to the connection for repositories.
    pub fn shared_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the connection pool.
    ///
    /// Handles still held elsewhere keep the pool alive; it is released when
    /// the last one drops.
    pub async fn close(self) -> AppResult<()> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => connection.close().await?,
            Err(_) => tracing::debug!("Connection still shared, leaving it to drop"),
        }
        Ok(())
    }
}
