use anyhow::Error;

use super::{ImportJob, ImportSummary};
use crate::error::ImportError;

/// Broad kind of an import failure, used to pick the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    SourceNotFound,
    /// Unreadable CSV, bad header or bad table name.
    Input,
    /// Anything the store rejected.
    Store,
    Unexpected,
}

/// Walk the error chain; the first recognised cause wins.
pub fn classify(err: &Error) -> Failure {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ImportError>() {
            return match e {
                ImportError::SourceNotFound(_) => Failure::SourceNotFound,
                _ => Failure::Input,
            };
        }
        if cause.is::<duckdb::Error>() {
            return Failure::Store;
        }
        if cause.is::<csv::Error>() {
            return Failure::Input;
        }
    }
    Failure::Unexpected
}

pub fn describe_failure(err: &Error) -> String {
    match classify(err) {
        Failure::SourceNotFound => format!("Error: {}", err.root_cause()),
        Failure::Input => format!("Source error: {:#}", err),
        Failure::Store => format!("Store error: {:#}", err),
        Failure::Unexpected => format!("An unexpected error occurred: {:#}", err),
    }
}

pub fn describe_success(job: &ImportJob, summary: &ImportSummary) -> String {
    format!(
        "Successfully imported {} rows ({} skipped) from '{}' to table '{}' in '{}'",
        summary.rows_imported,
        summary.rows_skipped(),
        job.source.display(),
        summary.table,
        job.store.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duck::{self, TableState};
    use anyhow::{anyhow, Context, Result};
    use std::path::PathBuf;

    #[test]
    fn not_found_message_names_path() {
        let err: Error = ImportError::SourceNotFound(PathBuf::from("in/data.csv")).into();
        assert_eq!(classify(&err), Failure::SourceNotFound);
        assert_eq!(
            describe_failure(&err),
            "Error: CSV file not found at 'in/data.csv'"
        );
    }

    #[test]
    fn store_error_found_behind_context() -> Result<()> {
        let conn = duck::open_mem_db()?;
        let err = conn
            .execute_batch("CREATE TABLE (")
            .context("creating table t")
            .unwrap_err();
        assert_eq!(classify(&err), Failure::Store);
        assert!(describe_failure(&err).starts_with("Store error: creating table t: "));
        Ok(())
    }

    #[test]
    fn header_defect_is_input() {
        let err: Error = ImportError::DuplicateColumn {
            name: "a".into(),
            first: 0,
            second: 1,
        }
        .into();
        assert_eq!(classify(&err), Failure::Input);
        assert_eq!(
            describe_failure(&err),
            "Source error: headers at index 0 and 1 both map to column `a`"
        );
    }

    #[test]
    fn unknown_error_is_unexpected() {
        let err = anyhow!("disk on fire");
        assert_eq!(classify(&err), Failure::Unexpected);
        assert_eq!(
            describe_failure(&err),
            "An unexpected error occurred: disk on fire"
        );
    }

    #[test]
    fn success_line_counts_rows() {
        let job = ImportJob::new("a.csv", "s.duckdb", "t");
        let summary = ImportSummary {
            table: "t".into(),
            columns: Vec::new(),
            table_state: TableState::Created,
            rows_imported: 2,
            skipped: Vec::new(),
        };
        assert_eq!(
            describe_success(&job, &summary),
            "Successfully imported 2 rows (0 skipped) from 'a.csv' to table 't' in 's.duckdb'"
        );
    }
}
