//! Harvest coordinator - the pipeline driver
//!
//! Runs the four stages strictly in sequence: Collect, Dedupe, Enrich,
//! Aggregate. Each stage completes, including its per-unit failure handling,
//! before the next begins. Artifact write failures abort the run; everything
//! else is recorded in the run report.

use crate::config::Config;
use crate::harvest::aggregate::summarize;
use crate::harvest::api::{MarketApi, SearchTarget};
use crate::harvest::collector::collect_listings;
use crate::harvest::dedupe::{dedupe, DedupedListings};
use crate::harvest::enricher::enrich_histories;
use crate::harvest::progress::{ProgressReporter, Stage};
use crate::harvest::scheduler::Pacer;
use crate::harvest::source::MarketSource;
use crate::model::{Listing, VehicleHistory};
use crate::output::{
    generate_markdown_report, read_json_snapshot, write_json_snapshot, write_summary_csv, RunMode,
    RunReport,
};
use crate::LedgerError;
use std::path::Path;

/// Main pipeline driver
///
/// Owns the configuration, the data source and every in-memory collection
/// for the duration of a run.
pub struct Harvester<S = MarketApi> {
    config: Config,
    source: S,
    pacer: Pacer,
    reporter: ProgressReporter,
    config_hash: Option<String>,
}

impl Harvester<MarketApi> {
    /// Creates a harvester talking to the configured marketplace API
    pub fn new(config: Config) -> Result<Self, LedgerError> {
        let source = MarketApi::new(&config.api)?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: MarketSource> Harvester<S> {
    /// Creates a harvester around any market source
    pub fn with_source(config: Config, source: S) -> Self {
        let pacer = Pacer::from_config(&config.pacing);
        let reporter = ProgressReporter::new(config.pacing.progress_interval);

        Self {
            config,
            source,
            pacer,
            reporter,
            config_hash: None,
        }
    }

    /// Attaches the configuration hash recorded in the run report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// The vehicle being searched for
    pub fn target(&self) -> SearchTarget {
        search_target(&self.config)
    }

    /// Runs Collect, Dedupe, Enrich and Aggregate to completion
    pub async fn run(&mut self) -> Result<RunReport, LedgerError> {
        let target = self.target();
        let mut report = RunReport::new(RunMode::Harvest, target_label(&target));
        report.config_hash = self.config_hash.clone();

        tracing::info!("Starting harvest for {}", report.target);

        // Collect
        let collected = collect_listings(
            &self.source,
            &target,
            &self.config.search.partitions,
            self.config.search.page_limit,
            &self.reporter,
        )
        .await;

        let listings_path = Path::new(&self.config.output.listings_path);
        write_json_snapshot(listings_path, &collected.listings)?;
        self.reporter
            .artifact_written("listings", listings_path, collected.listings.len());
        report.record_artifact("listings snapshot", listings_path);

        report.partitions = collected.partitions.clone();
        report.listings_collected = collected.listings.len();

        // Dedupe
        let deduped = dedupe_stage(&collected.listings, &self.reporter);
        report.unique_vins = deduped.len();
        report.listings_without_vin = deduped.without_vin;

        // Enrich
        let batch = enrich_histories(
            &self.source,
            &deduped.vins,
            &mut self.pacer,
            &self.reporter,
        )
        .await;

        let history_path = Path::new(&self.config.output.history_path);
        write_json_snapshot(history_path, &batch.histories)?;
        self.reporter
            .artifact_written("vehicle histories", history_path, batch.histories.len());
        report.record_artifact("history snapshot", history_path);

        report.vins_enriched = batch.histories.len();
        report.vin_skips = batch.skipped.clone();

        // Aggregate
        self.aggregate_stage(&deduped, &batch.histories, &mut report)?;

        report.finish();
        self.write_report(&mut report)?;

        tracing::info!(
            "Harvest complete: {}/{} partitions fetched, {}/{} VINs enriched, {} summary rows",
            report.partitions_fetched(),
            report.partitions.len(),
            report.vins_enriched,
            report.unique_vins,
            report.summary_rows
        );

        Ok(report)
    }

    /// Rebuilds the summary table from the existing snapshots, no network
    pub fn rebuild_from_snapshots(&mut self) -> Result<RunReport, LedgerError> {
        let target = self.target();
        let mut report = RunReport::new(RunMode::Rebuild, target_label(&target));
        report.config_hash = self.config_hash.clone();

        let listings: Vec<Listing> =
            read_json_snapshot(Path::new(&self.config.output.listings_path))?;
        let histories: Vec<VehicleHistory> =
            read_json_snapshot(Path::new(&self.config.output.history_path))?;

        tracing::info!(
            "Loaded {} listings and {} vehicle histories from snapshots",
            listings.len(),
            histories.len()
        );

        report.listings_collected = listings.len();
        report.vins_enriched = histories.len();

        let deduped = dedupe_stage(&listings, &self.reporter);
        report.unique_vins = deduped.len();
        report.listings_without_vin = deduped.without_vin;

        self.aggregate_stage(&deduped, &histories, &mut report)?;

        report.finish();
        self.write_report(&mut report)?;

        Ok(report)
    }

    fn aggregate_stage(
        &self,
        deduped: &DedupedListings,
        histories: &[VehicleHistory],
        report: &mut RunReport,
    ) -> Result<(), LedgerError> {
        let aggregation = summarize(deduped, histories, &self.reporter);

        let summary_path = Path::new(&self.config.output.summary_path);
        write_summary_csv(summary_path, &aggregation.rows, self.config.output.quote_fields)?;
        self.reporter
            .artifact_written("summary rows", summary_path, aggregation.rows.len());
        report.record_artifact("summary table", summary_path);

        report.summary_rows = aggregation.rows.len();
        report.summary_skips = aggregation.skipped;

        Ok(())
    }

    fn write_report(&self, report: &mut RunReport) -> Result<(), LedgerError> {
        if let Some(report_path) = &self.config.output.report_path {
            let path = Path::new(report_path);
            report.record_artifact("run report", path);
            generate_markdown_report(report, path)?;
            tracing::info!("Saved run report to {}", path.display());
        }
        Ok(())
    }
}

fn dedupe_stage(listings: &[Listing], reporter: &ProgressReporter) -> DedupedListings {
    reporter.stage_started(Stage::Dedupe, listings.len());
    let deduped = dedupe(listings);
    reporter.stage_finished(Stage::Dedupe, deduped.len(), deduped.without_vin);
    deduped
}

/// Builds the search target from configuration
pub fn search_target(config: &Config) -> SearchTarget {
    SearchTarget {
        make: config.search.make.clone(),
        model: config.search.model.clone(),
        year: config.search.year,
    }
}

fn target_label(target: &SearchTarget) -> String {
    format!("{} {} {}", target.year, target.make, target.model)
}

/// Runs a complete harvest against the configured API
///
/// # Example
///
/// ```no_run
/// use vin_ledger::config::load_config;
/// use vin_ledger::harvest::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("ledger.toml"))?;
/// let report = run_harvest(config).await?;
/// println!("{} summary rows", report.summary_rows);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<RunReport, LedgerError> {
    let mut harvester = Harvester::new(config)?;
    harvester.run().await
}
