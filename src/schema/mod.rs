pub mod derive;
pub mod sql;
pub mod types;

pub use derive::{derive_columns, sanitize_header};
pub use sql::{create_table_sql, insert_sql, quote_ident, validate_table_name};
pub use types::Column;
