// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failures the importer recognises by name. Store and CSV errors travel as
/// their own types inside `anyhow::Error`.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file not found at '{}'", .0.display())]
    SourceNotFound(PathBuf),

    #[error("'{}' has no header row", .0.display())]
    MissingHeader(PathBuf),

    #[error("header at index {index} is empty after sanitizing")]
    EmptyColumnName { index: usize },

    #[error("headers at index {first} and {second} both map to column `{name}`")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("table name must not be empty")]
    InvalidTableName,
}
