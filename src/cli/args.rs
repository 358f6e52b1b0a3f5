//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing. Every connection
//! flag falls back to the matching environment variable, then to its default.

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_POSTGRES_DB, DEFAULT_POSTGRES_HOST, DEFAULT_POSTGRES_PASSWORD, DEFAULT_POSTGRES_PORT,
    DEFAULT_POSTGRES_SCHEMA, DEFAULT_POSTGRES_USER, DEFAULT_REPLICATION_ROLE,
};

/// Prepare a PostgreSQL database for change data capture
#[derive(Parser, Debug)]
#[command(name = "cdc-db-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Ensure the table, replica identity and replication grant
    Run,

    /// Show which steps are satisfied without changing anything
    Status,
}

/// Connection and target settings
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long, global = true, env = "POSTGRES_HOST", default_value = DEFAULT_POSTGRES_HOST)]
    pub host: String,

    /// Database port
    #[arg(long, global = true, env = "POSTGRES_PORT", default_value_t = DEFAULT_POSTGRES_PORT)]
    pub port: u16,

    /// Database name
    #[arg(long, global = true, env = "POSTGRES_DB", default_value = DEFAULT_POSTGRES_DB)]
    pub database: String,

    /// Login user
    #[arg(long, global = true, env = "POSTGRES_USER", default_value = DEFAULT_POSTGRES_USER)]
    pub user: String,

    /// Login password
    #[arg(
        long,
        global = true,
        env = "POSTGRES_PASSWORD",
        default_value = DEFAULT_POSTGRES_PASSWORD,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Schema holding the captured table
    #[arg(long, global = true, env = "POSTGRES_SCHEMA", default_value = DEFAULT_POSTGRES_SCHEMA)]
    pub schema: String,

    /// Role that the CDC connector logs in as
    #[arg(long, global = true, env = "REPLICATION_ROLE", default_value = DEFAULT_REPLICATION_ROLE)]
    pub replication_role: String,

    /// Connect timeout in seconds (driver default when unset)
    #[arg(long, global = true, env = "POSTGRES_CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: Option<u64>,
}
