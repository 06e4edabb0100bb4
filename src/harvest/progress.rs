//! Progress and diagnostics notices
//!
//! The reporter only emits `tracing` events. It never decides anything: the
//! stages hand it what happened and carry on.

use crate::harvest::outcome::SkipReason;
use std::fmt;

/// Pipeline stage names used in notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collect,
    Dedupe,
    Enrich,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Collect => "collect",
            Stage::Dedupe => "dedupe",
            Stage::Enrich => "enrich",
            Stage::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// Emits stage, progress and per-unit error notices
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    progress_interval: usize,
}

impl ProgressReporter {
    pub fn new(progress_interval: usize) -> Self {
        Self {
            progress_interval: progress_interval.max(1),
        }
    }

    pub fn stage_started(&self, stage: Stage, units: usize) {
        tracing::info!("[{}] starting ({} units)", stage, units);
    }

    pub fn stage_finished(&self, stage: Stage, succeeded: usize, skipped: usize) {
        tracing::info!(
            "[{}] finished: {} succeeded, {} skipped",
            stage,
            succeeded,
            skipped
        );
    }

    pub fn partition_fetched(&self, partition: &str, reported_total: u64, returned: usize) {
        tracing::info!(
            "Found {} listings in {} ({} returned)",
            reported_total,
            partition,
            returned
        );
    }

    pub fn partition_skipped(&self, partition: &str, reason: &SkipReason) {
        tracing::warn!("Error fetching listings for {}: {}", partition, reason);
    }

    pub fn vin_skipped(&self, vin: &str, reason: &SkipReason) {
        match reason {
            SkipReason::EmptyHistory => tracing::info!("No history for VIN {}", vin),
            _ => tracing::warn!("Error fetching history for VIN {}: {}", vin, reason),
        }
    }

    pub fn summary_skipped(&self, vin: &str, reason: &SkipReason) {
        tracing::warn!("VIN {} left out of summary: {}", vin, reason);
    }

    /// Emits a progress notice when `processed` lands on the interval
    ///
    /// Returns whether a notice was emitted.
    pub fn vins_processed(&self, processed: usize, total: usize) -> bool {
        if processed > 0 && processed % self.progress_interval == 0 {
            tracing::info!("Processed {}/{} VINs", processed, total);
            true
        } else {
            false
        }
    }

    pub fn artifact_written(&self, label: &str, path: &std::path::Path, entries: usize) {
        tracing::info!("Saved {} {} to {}", entries, label, path.display());
    }
}
