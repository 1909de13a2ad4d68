pub mod duck;
pub mod error;
pub mod import;
pub mod schema;

pub use error::ImportError;
pub use import::{import_csv, ImportJob, ImportSummary, SkippedRow};
