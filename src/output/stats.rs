//! Run report: what every stage produced and what it skipped
//!
//! The report is assembled by the harvester from the explicit per-unit
//! outcomes of each stage, so every skip is listed with its reason.

use crate::harvest::{PartitionOutcome, SkippedUnit};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How the run was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Full acquisition against the remote API
    #[default]
    Harvest,

    /// Summary rebuilt from existing snapshots, no network
    Rebuild,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub mode: RunMode,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub config_hash: Option<String>,

    /// e.g. "2021 Honda Accord"
    pub target: String,

    pub partitions: Vec<PartitionOutcome>,
    pub listings_collected: usize,
    pub unique_vins: usize,
    pub listings_without_vin: usize,

    pub vins_enriched: usize,
    pub vin_skips: Vec<SkippedUnit>,

    pub summary_rows: usize,
    pub summary_skips: Vec<SkippedUnit>,

    /// (artifact label, path) in write order
    pub artifacts: Vec<(String, PathBuf)>,
}

impl RunReport {
    pub fn new(mode: RunMode, target: impl Into<String>) -> Self {
        Self {
            mode,
            started_at: Some(Utc::now()),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }

    pub fn partitions_fetched(&self) -> usize {
        self.partitions.iter().filter(|p| p.is_fetched()).count()
    }

    pub fn partitions_skipped(&self) -> usize {
        self.partitions.len() - self.partitions_fetched()
    }

    /// Remote-reported totals summed over fetched partitions
    pub fn reported_total(&self) -> u64 {
        self.partitions
            .iter()
            .map(|p| match p {
                PartitionOutcome::Fetched { reported_total, .. } => *reported_total,
                PartitionOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    /// VIN skips grouped by reason label
    pub fn vin_skips_by_reason(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for skip in &self.vin_skips {
            *counts.entry(skip.reason.label()).or_insert(0) += 1;
        }
        counts
    }

    pub fn record_artifact(&mut self, label: &str, path: impl Into<PathBuf>) {
        self.artifacts.push((label.to_string(), path.into()));
    }
}

/// Prints the report to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Run Report: {} ===\n", report.target);

    if report.mode == RunMode::Harvest {
        println!("Partitions:");
        for outcome in &report.partitions {
            match outcome {
                PartitionOutcome::Fetched {
                    partition,
                    reported_total,
                    returned,
                } => println!(
                    "  {}: {} returned ({} reported by remote)",
                    partition, returned, reported_total
                ),
                PartitionOutcome::Skipped { partition, reason } => {
                    println!("  {}: SKIPPED ({})", partition, reason)
                }
            }
        }
        println!(
            "  {} fetched, {} skipped\n",
            report.partitions_fetched(),
            report.partitions_skipped()
        );
    }

    println!("Listings:");
    println!("  Collected: {}", report.listings_collected);
    println!("  Unique VINs: {}", report.unique_vins);
    if report.listings_without_vin > 0 {
        println!("  Without VIN: {}", report.listings_without_vin);
    }
    println!();

    println!("History:");
    println!("  Enriched: {}", report.vins_enriched);
    println!("  Skipped: {}", report.vin_skips.len());
    for (label, count) in report.vin_skips_by_reason() {
        println!("    {}: {}", label, count);
    }
    println!();

    println!("Summary:");
    println!("  Rows: {}", report.summary_rows);
    if !report.summary_skips.is_empty() {
        println!("  Left out: {}", report.summary_skips.len());
        for skip in &report.summary_skips {
            println!("    {} ({})", skip.key, skip.reason);
        }
    }
    println!();

    if !report.artifacts.is_empty() {
        println!("Artifacts:");
        for (label, path) in &report.artifacts {
            println!("  {}: {}", label, path.display());
        }
    }
}
