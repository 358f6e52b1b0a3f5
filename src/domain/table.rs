//! Descriptor of the captured table.
//!
//! The descriptor is additive: it says what to create when the table is
//! missing and is never used to alter an existing table.

use crate::config::{CUSTOMERS_TABLE, CUSTOMERS_TEXT_COLUMN_LENGTH};
use crate::utils::identifier;

/// Column type as far as this tool cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Auto-incrementing integer primary key
    SerialPrimaryKey,
    /// Nullable `VARCHAR(n)`
    VarChar(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Table the CDC connector captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub schema: String,
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableDescriptor {
    /// `customers (id SERIAL PRIMARY KEY, name VARCHAR(255), email VARCHAR(255))`
    pub fn customers(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: CUSTOMERS_TABLE.to_string(),
            columns: vec![
                ColumnSpec::new("id", ColumnKind::SerialPrimaryKey),
                ColumnSpec::new("name", ColumnKind::VarChar(CUSTOMERS_TEXT_COLUMN_LENGTH)),
                ColumnSpec::new("email", ColumnKind::VarChar(CUSTOMERS_TEXT_COLUMN_LENGTH)),
            ],
        }
    }

    /// Quoted `"schema"."name"` for hand-written DDL.
    pub fn quoted_name(&self) -> String {
        identifier::quote_qualified(&self.schema, &self.name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customers_descriptor() {
        let table = TableDescriptor::customers("public");

        assert_eq!(table.name, "customers");
        assert_eq!(table.column_names(), vec!["id", "name", "email"]);
        assert_eq!(table.columns[0].kind, ColumnKind::SerialPrimaryKey);
        assert_eq!(table.columns[2].kind, ColumnKind::VarChar(255));
        assert_eq!(table.quoted_name(), "\"public\".\"customers\"");
    }
}
