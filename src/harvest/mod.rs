//! Harvest module: the listing and history acquisition pipeline
//!
//! This module contains:
//! - The remote fetch client and marketplace endpoints
//! - Partitioned listing collection
//! - VIN deduplication
//! - Paced, sequential history enrichment
//! - Aggregation into summary rows
//! - The pipeline driver that runs the stages in order

mod aggregate;
mod api;
mod collector;
mod coordinator;
mod dedupe;
mod enricher;
mod fetcher;
mod outcome;
mod progress;
mod scheduler;
mod source;

pub use aggregate::{epoch_to_date, price_extremes, summarize, summarize_vehicle, Aggregation};
pub use api::{MarketApi, SearchTarget};
pub use collector::{collect_listings, CollectedListings};
pub use coordinator::{run_harvest, search_target, Harvester};
pub use dedupe::{dedupe, DedupedListings};
pub use enricher::{enrich_histories, EnrichmentBatch};
pub use fetcher::{build_http_client, fetch_json, redact_url};
pub use outcome::{PartitionOutcome, SkipReason, SkippedUnit};
pub use progress::{ProgressReporter, Stage};
pub use scheduler::Pacer;
pub use source::MarketSource;
