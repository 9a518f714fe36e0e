use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod clear;
pub mod export;
pub mod ingest;
pub mod report;
pub mod setup;
pub mod status;

pub use clear::handle_clear;
pub use export::handle_export;
pub use ingest::handle_ingest;
pub use report::handle_report;
pub use setup::handle_setup;
pub use status::handle_status;

#[derive(Subcommand)]
pub enum Command {
    /// Create the schema and seed currencies and symbols
    Setup,
    /// Backfill a date range from the upstream APIs
    Ingest {
        #[arg(value_enum)]
        target: IngestTarget,

        /// First day to fetch (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day to fetch, defaults to the end of one batch
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Write both fact tables as CSV
    Export {
        /// Output directory, defaults to OUTPUT_DIR
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Compute correlations and largest moves
    Report {
        /// Report file, defaults to OUTPUT_DIR/metrics.txt
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show row counts and stored date ranges
    Status,
    /// Delete every exchange rate and stock row
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IngestTarget {
    Rates,
    Stocks,
    All,
}
