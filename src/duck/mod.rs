use anyhow::{Context, Result};
use duckdb::Connection;
use std::path::Path;
use tracing::debug;

use crate::schema::{create_table_sql, quote_ident, Column};

/// Whether `ensure_table` had to create the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Created,
    Reused,
}

/// Open a DuckDB database on disk at `path`, creating the file if it doesn't exist.
pub fn open_disk_db<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)
        .with_context(|| format!("opening store {}", path.display()))?;
    Ok(conn)
}

/// Open a DuckDB in‐memory database
#[cfg(test)]
pub(crate) fn open_mem_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    Ok(conn)
}

/// Table names compare case-insensitively, as the store resolves them.
pub fn table_exists(conn: &Connection, table_name: &str) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables WHERE lower(table_name) = lower(?::VARCHAR)",
        [table_name],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

/// Create `table_name` with `columns` unless it already exists. An existing
/// table keeps whatever schema it has.
pub fn ensure_table(conn: &Connection, table_name: &str, columns: &[Column]) -> Result<TableState> {
    let existed = table_exists(conn, table_name)?;
    let sql = create_table_sql(table_name, columns);
    debug!(%sql, "ensure_table");
    conn.execute_batch(&sql)
        .with_context(|| format!("creating table {}", table_name))?;
    Ok(if existed {
        TableState::Reused
    } else {
        TableState::Created
    })
}

/// Column names of `table_name` in declaration order.
pub fn table_columns(conn: &Connection, table_name: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT column_name FROM information_schema.columns \
         WHERE lower(table_name) = lower(?::VARCHAR) ORDER BY ordinal_position",
    )?;
    let names = stmt
        .query_map([table_name], |r| r.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

pub fn count_rows(conn: &Connection, table_name: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table_name));
    let n = conn.query_row(&sql, [], |r| r.get(0))?;
    Ok(n)
}
