//! Application configuration module
//!
//! Handles environment variables, CLI flags and application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
