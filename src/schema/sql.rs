// src/schema/sql.rs
use anyhow::Result;

use super::Column;
use crate::error::ImportError;

/// Wrap an identifier in double quotes, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn validate_table_name(table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() {
        return Err(ImportError::InvalidTableName.into());
    }
    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS "<table>" ("<col>" TEXT, ...)`
pub fn create_table_sql(table_name: &str, columns: &[Column]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.ty))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_ident(table_name),
        cols.join(", ")
    )
}

/// Positional insert with one `?` per column; values are always bound.
pub fn insert_sql(table_name: &str, column_count: usize) -> String {
    let placeholders = vec!["?"; column_count].join(", ");
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_ident(table_name),
        placeholders
    )
}
