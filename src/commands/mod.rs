//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod run;
pub mod status;

use crate::errors::AppError;

/// Print the single failure line (plus remediation hint) for a fatal error.
pub fn report_failure(error: &AppError) {
    match error {
        AppError::Connection { .. } | AppError::Config(_) => println!("\n❌ {}", error),
        _ => println!("\n❌ Migration failed: {}", error),
    }

    if let Some(hint) = error.remediation() {
        println!("\n{}", hint);
    }
}
