//! Output module for durable artifacts and run reports
//!
//! This module handles:
//! - Writing and reading the JSON listing and history snapshots
//! - Writing the derived CSV summary table
//! - Printing and exporting the run report

mod csv_summary;
mod markdown;
mod snapshot;
pub mod stats;

pub use csv_summary::{format_summary_csv, write_summary_csv};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use snapshot::{read_json_snapshot, write_json_snapshot};
pub use stats::{print_report, RunMode, RunReport};
