//! Utility functions and helpers.

pub mod identifier;
