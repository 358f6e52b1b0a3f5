//! Connection settings resolved from CLI flags and their env fallbacks.

use std::time::Duration;

use sea_orm::sqlx::postgres::PgConnectOptions;

use crate::cli::ConnectionArgs;
use crate::errors::{AppError, AppResult};
use crate::utils::identifier;

/// Application configuration.
///
/// Built once at startup and passed explicitly to the commands.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    password: String,
    pub schema: String,
    pub replication_role: String,
    pub connect_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("schema", &self.schema)
            .field("replication_role", &self.replication_role)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Config {
    /// Validate parsed CLI arguments into a configuration.
    pub fn from_args(args: ConnectionArgs) -> AppResult<Self> {
        if args.host.trim().is_empty() {
            return Err(AppError::config("database host must not be empty"));
        }
        if args.database.trim().is_empty() {
            return Err(AppError::config("database name must not be empty"));
        }
        identifier::validate(&args.schema)
            .map_err(|e| AppError::config(format!("schema: {e}")))?;
        identifier::validate(&args.replication_role)
            .map_err(|e| AppError::config(format!("replication role: {e}")))?;

        Ok(Self {
            host: args.host,
            port: args.port,
            database: args.database,
            user: args.user,
            password: args.password,
            schema: args.schema,
            replication_role: args.replication_role,
            connect_timeout: args
                .connect_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }

    /// `host:port/database`, safe to print.
    pub fn target(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}/{}", self.host, self.port, self.database)
        } else {
            format!("{}:{}/{}", self.host, self.port, self.database)
        }
    }

    /// Driver options including credentials. Never log these.
    ///
    /// A host starting with `/` is the directory of the server's Unix socket.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database);

        if self.host.starts_with('/') {
            options.socket(&self.host)
        } else {
            options.host(&self.host)
        }
    }
}
