//! Listing collection across region partitions
//!
//! Partitions are queried strictly one after another. A failing partition is
//! logged and recorded, and collection moves on to the next one.

use crate::harvest::api::SearchTarget;
use crate::harvest::outcome::{PartitionOutcome, SkipReason};
use crate::harvest::progress::{ProgressReporter, Stage};
use crate::harvest::source::MarketSource;
use crate::model::Listing;

/// Listings gathered from every partition that answered
#[derive(Debug, Clone, Default)]
pub struct CollectedListings {
    /// Concatenation of successful partitions, in partition order
    pub listings: Vec<Listing>,

    /// One outcome per requested partition, in request order
    pub partitions: Vec<PartitionOutcome>,
}

impl CollectedListings {
    pub fn fetched_partitions(&self) -> usize {
        self.partitions.iter().filter(|p| p.is_fetched()).count()
    }

    pub fn skipped_partitions(&self) -> usize {
        self.partitions.len() - self.fetched_partitions()
    }
}

/// Fetches one page of recent listings per partition
///
/// # Arguments
///
/// * `source` - Where listing pages come from
/// * `target` - Make, model and year to search for
/// * `partitions` - Region codes, queried in this order
/// * `limit` - Page size requested per partition
/// * `reporter` - Receives per-partition notices
pub async fn collect_listings<S: MarketSource>(
    source: &S,
    target: &SearchTarget,
    partitions: &[String],
    limit: u32,
    reporter: &ProgressReporter,
) -> CollectedListings {
    reporter.stage_started(Stage::Collect, partitions.len());

    let mut collected = CollectedListings::default();

    for partition in partitions {
        tracing::info!(
            "Fetching recent listings for {} {} {} in {}...",
            target.year,
            target.make,
            target.model,
            partition
        );

        match source.recent_listings(target, partition, limit).await {
            Ok(page) => {
                let returned = page.listings.len();
                reporter.partition_fetched(partition, page.num_found, returned);
                collected.listings.extend(page.listings);
                collected.partitions.push(PartitionOutcome::Fetched {
                    partition: partition.clone(),
                    reported_total: page.num_found,
                    returned,
                });
            }
            Err(e) => {
                let reason = SkipReason::from(&e);
                reporter.partition_skipped(partition, &reason);
                collected.partitions.push(PartitionOutcome::Skipped {
                    partition: partition.clone(),
                    reason,
                });
            }
        }
    }

    reporter.stage_finished(
        Stage::Collect,
        collected.fetched_partitions(),
        collected.skipped_partitions(),
    );
    tracing::info!("Total listings found: {}", collected.listings.len());

    collected
}
