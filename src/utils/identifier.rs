//! SQL identifier validation and quoting.
//!
//! Schema and role names end up inside DDL that cannot take bind
//! parameters, so they are restricted to plain identifiers and always
//! emitted double-quoted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MAX_IDENTIFIER_LENGTH;

static PLAIN_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// Check that `name` is a plain, unquoted PostgreSQL identifier.
pub fn validate(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("identifier must not be empty".to_string());
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(format!(
            "'{}' is longer than {} bytes",
            name, MAX_IDENTIFIER_LENGTH
        ));
    }
    if !PLAIN_IDENTIFIER.is_match(name) {
        return Err(format!(
            "'{}' must start with a letter or underscore and contain only letters, digits, '_' or '$'",
            name
        ));
    }
    Ok(())
}

/// Double-quote an identifier, escaping embedded quotes.
pub fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"schema"."name"`
pub fn quote_qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote(schema), quote(name))
}
