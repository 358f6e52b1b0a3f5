//! Application-wide constants
//!
//! Centralized location for defaults and catalog values.

// =============================================================================
// Connection defaults
// =============================================================================

/// Default database host
pub const DEFAULT_POSTGRES_HOST: &str = "localhost";

/// Default database port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_POSTGRES_DB: &str = "example";

/// Default login user (matches the docker-compose CDC setup)
pub const DEFAULT_POSTGRES_USER: &str = "dbz";

/// Default login password (development only)
pub const DEFAULT_POSTGRES_PASSWORD: &str = "dbz";

// =============================================================================
// Capture target
// =============================================================================

/// Default schema holding the captured table
pub const DEFAULT_POSTGRES_SCHEMA: &str = "public";

/// Name of the captured table
pub const CUSTOMERS_TABLE: &str = "customers";

/// Width of the text columns on the captured table
pub const CUSTOMERS_TEXT_COLUMN_LENGTH: u32 = 255;

/// Role the CDC connector logs in as
pub const DEFAULT_REPLICATION_ROLE: &str = "dbz";

// =============================================================================
// Identifiers
// =============================================================================

/// PostgreSQL truncates identifiers beyond NAMEDATALEN - 1 bytes
pub const MAX_IDENTIFIER_LENGTH: usize = 63;
