//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Only fatal
//! conditions live here: a replication grant that the server refuses is a
//! step outcome, not an error.

use sea_orm::DbErr;
use thiserror::Error;

use crate::domain::Step;

/// Driver error from either the pool or SeaORM
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Fatal before any step runs
    #[error("Database connection failed ({target}): {source}")]
    Connection {
        target: String,
        #[source]
        source: BoxError,
    },

    // Fatal inside a step; the remaining steps are skipped
    #[error("{step} failed: {source}")]
    SchemaOperation {
        step: Step,
        #[source]
        source: Box<AppError>,
    },

    // Driver errors before they are attributed to a step
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    // The catalog answered, but not with something we understand
    #[error("Unexpected catalog state: {0}")]
    Catalog(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Connection { .. } => "CONNECTION_ERROR",
            AppError::SchemaOperation { .. } => "SCHEMA_OPERATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Step the error happened in, if any
    pub fn step(&self) -> Option<Step> {
        match self {
            AppError::SchemaOperation { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Operator hint printed under the failure line
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            AppError::Connection { .. } => Some("Make sure PostgreSQL is running:\n  make up"),
            AppError::Config(_) => Some("Check the POSTGRES_* environment variables or CLI flags"),
            _ => None,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Attach the failing step to an error
pub trait StepContext<T> {
    fn in_step(self, step: Step) -> AppResult<T>;
}

impl<T> StepContext<T> for AppResult<T> {
    fn in_step(self, step: Step) -> AppResult<T> {
        self.map_err(|e| match e {
            // Already attributed, keep the innermost step
            AppError::SchemaOperation { .. } => e,
            other => AppError::SchemaOperation {
                step,
                source: Box::new(other),
            },
        })
    }
}

/// Convenience constructors
impl AppError {
    pub fn connection(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Connection {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn catalog(msg: impl Into<String>) -> Self {
        AppError::Catalog(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}
