//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `run` - Apply the bootstrap steps (default)
//! - `status` - Report which steps are already satisfied

pub mod args;

pub use args::{Cli, Commands, ConnectionArgs};
