//! Paced, sequential history enrichment
//!
//! Each VIN waits on the pacer and then issues exactly one history request.
//! The request is awaited before the next VIN starts, so requests never
//! overlap. Failures and empty histories are recorded as skips.

use crate::harvest::outcome::{SkipReason, SkippedUnit};
use crate::harvest::progress::{ProgressReporter, Stage};
use crate::harvest::scheduler::Pacer;
use crate::harvest::source::MarketSource;
use crate::model::VehicleHistory;

/// Result of enriching a batch of VINs
#[derive(Debug, Clone, Default)]
pub struct EnrichmentBatch {
    /// Histories in VIN order, only for VINs with at least one record
    pub histories: Vec<VehicleHistory>,

    /// VINs that contributed nothing, with the reason
    pub skipped: Vec<SkippedUnit>,
}

impl EnrichmentBatch {
    pub fn processed(&self) -> usize {
        self.histories.len() + self.skipped.len()
    }
}

/// Fetches history for each VIN in order, one request at a time
///
/// # Arguments
///
/// * `source` - Where histories come from
/// * `vins` - Unique VINs, in the order they should be requested
/// * `pacer` - Enforces the wait before every request
/// * `reporter` - Receives progress and per-VIN notices
pub async fn enrich_histories<S: MarketSource>(
    source: &S,
    vins: &[String],
    pacer: &mut Pacer,
    reporter: &ProgressReporter,
) -> EnrichmentBatch {
    reporter.stage_started(Stage::Enrich, vins.len());
    tracing::info!("Fetching history for {} unique VINs...", vins.len());

    let mut batch = EnrichmentBatch::default();

    for (index, vin) in vins.iter().enumerate() {
        pacer.ready().await;
        tracing::debug!("Fetching history for VIN {}...", vin);

        match source.history(vin).await {
            Ok(records) if !records.is_empty() => {
                batch.histories.push(VehicleHistory::new(vin.clone(), records));
            }
            Ok(_) => {
                reporter.vin_skipped(vin, &SkipReason::EmptyHistory);
                batch
                    .skipped
                    .push(SkippedUnit::new(vin.clone(), SkipReason::EmptyHistory));
            }
            Err(e) => {
                let reason = SkipReason::from(&e);
                reporter.vin_skipped(vin, &reason);
                batch.skipped.push(SkippedUnit::new(vin.clone(), reason));
            }
        }

        reporter.vins_processed(index + 1, vins.len());
    }

    tracing::debug!(
        "History pacing served {} waits of {:?}",
        pacer.waits(),
        pacer.delay()
    );
    reporter.stage_finished(Stage::Enrich, batch.histories.len(), batch.skipped.len());

    batch
}
