//! Markdown run report
//!
//! Writes the run report as a small markdown document next to the other
//! artifacts so a run can be reviewed later without its console output.

use crate::harvest::PartitionOutcome;
use crate::output::stats::{RunMode, RunReport};
use crate::{ArtifactError, ArtifactResult};
use std::path::Path;

/// Writes the markdown report to `output_path`
pub fn generate_markdown_report(report: &RunReport, output_path: &Path) -> ArtifactResult<()> {
    let markdown = format_markdown_report(report);

    std::fs::write(output_path, markdown).map_err(|source| ArtifactError::Io {
        path: output_path.to_path_buf(),
        source,
    })
}

/// Formats a run report as markdown
pub fn format_markdown_report(report: &RunReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Listing Harvest Report: {}\n\n", report.target));

    // Run metadata
    md.push_str("## Run Information\n\n");
    let mode = match report.mode {
        RunMode::Harvest => "harvest",
        RunMode::Rebuild => "rebuild from snapshots",
    };
    md.push_str(&format!("- **Mode**: {}\n", mode));
    if let Some(started) = report.started_at {
        md.push_str(&format!("- **Started**: {}\n", started.to_rfc3339()));
    }
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!("- **Duration**: {} seconds\n", duration));
    }
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    if !report.partitions.is_empty() {
        md.push_str("## Partitions\n\n");
        md.push_str("| Partition | Status | Returned | Reported Total |\n");
        md.push_str("|-----------|--------|----------|----------------|\n");
        for outcome in &report.partitions {
            match outcome {
                PartitionOutcome::Fetched {
                    partition,
                    reported_total,
                    returned,
                } => md.push_str(&format!(
                    "| {} | fetched | {} | {} |\n",
                    partition, returned, reported_total
                )),
                PartitionOutcome::Skipped { partition, reason } => md.push_str(&format!(
                    "| {} | skipped: {} | - | - |\n",
                    partition,
                    escape_cell(&reason.to_string())
                )),
            }
        }
        md.push('\n');
    }

    md.push_str("## Counts\n\n");
    md.push_str("| Measure | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Listings collected | {} |\n", report.listings_collected));
    md.push_str(&format!("| Unique VINs | {} |\n", report.unique_vins));
    md.push_str(&format!(
        "| Listings without VIN | {} |\n",
        report.listings_without_vin
    ));
    md.push_str(&format!("| VINs enriched | {} |\n", report.vins_enriched));
    md.push_str(&format!("| VINs skipped | {} |\n", report.vin_skips.len()));
    md.push_str(&format!("| Summary rows | {} |\n\n", report.summary_rows));

    if !report.vin_skips.is_empty() {
        md.push_str("## Skipped VINs\n\n");
        md.push_str("| VIN | Reason |\n");
        md.push_str("|-----|--------|\n");
        for skip in &report.vin_skips {
            md.push_str(&format!(
                "| {} | {} |\n",
                skip.key,
                escape_cell(&skip.reason.to_string())
            ));
        }
        md.push('\n');
    }

    if !report.summary_skips.is_empty() {
        md.push_str("## Left Out of Summary\n\n");
        for skip in &report.summary_skips {
            md.push_str(&format!("- {} ({})\n", skip.key, skip.reason));
        }
        md.push('\n');
    }

    if !report.artifacts.is_empty() {
        md.push_str("## Artifacts\n\n");
        for (label, path) in &report.artifacts {
            md.push_str(&format!("- **{}**: `{}`\n", label, path.display()));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
