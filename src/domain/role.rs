//! Login role as seen through `pg_catalog.pg_user`.

/// A role that exists on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationRole {
    pub name: String,
    /// `pg_user.userepl`
    pub can_replicate: bool,
}
