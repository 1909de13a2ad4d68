use clap::Parser;
use csvdb::import::{describe_failure, describe_success, import_csv, ImportJob};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "csv-import", version)]
#[command(about = "Import CSV data into a DuckDB database table")]
struct Args {
    /// Path to the input CSV file
    source_file: PathBuf,

    /// Path to the database file (created if it doesn't exist)
    store_file: PathBuf,

    /// Name of the table to import data into
    table_name: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // ─── logging ─────────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let job = ImportJob::new(args.source_file, args.store_file, args.table_name);

    match import_csv(&job) {
        Ok(summary) => {
            info!(
                columns = %summary.column_names().join(", "),
                "{}",
                describe_success(&job, &summary)
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", describe_failure(&err));
            ExitCode::FAILURE
        }
    }
}
