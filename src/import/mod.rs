// src/import/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use duckdb::params_from_iter;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

use crate::{
    duck::{self, TableState},
    error::ImportError,
    schema::{derive_columns, insert_sql, validate_table_name, Column},
};

pub mod report;

pub use report::{classify, describe_failure, describe_success, Failure};

/// One import invocation: which file goes into which table of which store.
#[derive(Debug, Clone)]
pub struct ImportJob {
    pub source: PathBuf,
    pub store: PathBuf,
    pub table: String,
}

impl ImportJob {
    pub fn new(
        source: impl Into<PathBuf>,
        store: impl Into<PathBuf>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            store: store.into(),
            table: table.into(),
        }
    }
}

/// A data row left out because its field count disagreed with the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based, counting the header as row 1.
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
    pub fields: Vec<String>,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub table: String,
    pub columns: Vec<Column>,
    pub table_state: TableState,
    pub rows_imported: u64,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    pub fn rows_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Load `job.source` into `job.table` of the DuckDB store at `job.store`.
///
/// - a missing source aborts before the store is opened
/// - the header row is sanitized into TEXT columns and the table is created
///   if absent (an existing table is reused as-is)
/// - each data row is inserted positionally, or skipped with a warning when
///   its field count differs from the header
/// - every insert of the pass is committed in one transaction
///
/// Any error leaves the transaction uncommitted; the connection is dropped on
/// every path.
#[tracing::instrument(
    level = "info",
    skip(job),
    fields(source = %job.source.display(), table = %job.table)
)]
pub fn import_csv(job: &ImportJob) -> Result<ImportSummary> {
    if !job.source.exists() {
        return Err(ImportError::SourceNotFound(job.source.clone()).into());
    }
    info!("found source {}", job.source.display());
    validate_table_name(&job.table)?;

    let data = fs::read(&job.source)
        .with_context(|| format!("reading {}", job.source.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // row length mismatches are handled per row
        .from_reader(data.as_slice());

    let mut record = StringRecord::new();
    if !rdr
        .read_record(&mut record)
        .with_context(|| format!("reading header of {}", job.source.display()))?
    {
        return Err(ImportError::MissingHeader(job.source.clone()).into());
    }
    let headers: Vec<String> = record.iter().map(str::to_string).collect();
    let columns = derive_columns(&headers)?;

    let mut conn = duck::open_disk_db(&job.store)?;
    let table_state = duck::ensure_table(&conn, &job.table, &columns)?;
    info!(
        state = ?table_state,
        "Table '{}' ensured in database '{}'",
        job.table,
        job.store.display()
    );
    let store_columns = duck::table_columns(&conn, &job.table)?;
    debug!(columns = ?store_columns, "store columns for {}", job.table);

    let mut rows_imported = 0u64;
    let mut skipped = Vec::new();
    let mut row = 1usize;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx
            .prepare(&insert_sql(&job.table, columns.len()))
            .with_context(|| format!("preparing insert into {}", job.table))?;

        loop {
            // the reader drops blank lines; they still count as (empty) rows
            let start = rdr.position().byte() as usize;
            for _ in 0..blank_lines_at(&data, start) {
                row += 1;
                skip_row(&mut skipped, row, columns.len(), Vec::new());
            }

            let more = rdr.read_record(&mut record).with_context(|| {
                format!("CSV parse error in {} at row {}", job.source.display(), row + 1)
            })?;
            if !more {
                break;
            }
            row += 1;

            if record.len() != columns.len() {
                let fields = record.iter().map(str::to_string).collect();
                skip_row(&mut skipped, row, columns.len(), fields);
                continue;
            }

            stmt.execute(params_from_iter(record.iter()))
                .with_context(|| format!("inserting row {} into {}", row, job.table))?;
            rows_imported += 1;
        }
    }
    tx.commit().context("committing import")?;
    let total = duck::count_rows(&conn, &job.table)?;
    debug!(rows_imported, skipped = skipped.len(), total, "import committed");

    Ok(ImportSummary {
        table: job.table.clone(),
        columns,
        table_state,
        rows_imported,
        skipped,
    })
}

fn skip_row(skipped: &mut Vec<SkippedRow>, row: usize, expected: usize, fields: Vec<String>) {
    warn!(
        "Skipping row {} due to column count mismatch. Expected {}, got {}: {:?}",
        row,
        expected,
        fields.len(),
        fields
    );
    skipped.push(SkippedRow {
        row,
        expected,
        actual: fields.len(),
        fields,
    });
}

/// Count the empty lines starting at byte `start`.
///
/// `\r\n`, `\n` and a lone `\r` each end one line. A `\n` left over from
/// the `\r\n` that ended the previous record is not a line of its own.
fn blank_lines_at(data: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && data[i - 1] == b'\r' && data.get(i) == Some(&b'\n') {
        i += 1;
    }
    let mut n = 0;
    while let Some(&b) = data.get(i) {
        match b {
            b'\n' => i += 1,
            b'\r' if data.get(i + 1) == Some(&b'\n') => i += 2,
            b'\r' => i += 1,
            _ => break,
        }
        n += 1;
    }
    n
}
