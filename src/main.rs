//! vin-ledger main entry point
//!
//! This is the command-line interface for the listing and price-history harvester.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vin_ledger::config::{compute_config_hash, parse_config, validate, Config};
use vin_ledger::harvest::{redact_url, search_target, Harvester, MarketApi};
use vin_ledger::output::print_report;

/// vin-ledger: collect used-vehicle listings and their price history
///
/// Fetches recent listings for one make/model/year across region partitions,
/// enriches every unique VIN with its price history at a fixed pace, and
/// writes JSON snapshots plus a CSV summary.
#[derive(Parser, Debug)]
#[command(name = "vin-ledger")]
#[command(version = "1.0.0")]
#[command(about = "Paced used-vehicle listing and price-history harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// API credential, overriding the one in the config file
    #[arg(long, env = "MARKETCHECK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the queries that would be issued
    #[arg(long, conflicts_with = "from_snapshots")]
    dry_run: bool,

    /// Rebuild the summary table from existing snapshots without fetching
    #[arg(long, conflicts_with = "dry_run")]
    from_snapshots: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load(&cli) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.from_snapshots {
        handle_rebuild(config, config_hash)?;
    } else {
        handle_harvest(config, config_hash).await?;
    }

    Ok(())
}

/// Parses the config, applies the credential override, then validates
fn load(cli: &Cli) -> Result<(Config, String), vin_ledger::ConfigError> {
    let mut config = parse_config(&cli.config)?;
    if let Some(key) = &cli.api_key {
        config.api.api_key = key.clone();
    }
    validate(&config)?;
    let hash = compute_config_hash(&cli.config)?;
    Ok((config, hash))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vin_ledger=info,warn"),
            1 => EnvFilter::new("vin_ledger=debug,info"),
            2 => EnvFilter::new("vin_ledger=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let api = MarketApi::new(&config.api)?;
    let target = search_target(config);

    println!("=== vin-ledger Dry Run ===\n");

    println!("Target: {} {} {}", target.year, target.make, target.model);
    println!("Page limit per partition: {}", config.search.page_limit);
    println!(
        "History pacing: {}ms before each request",
        config.pacing.history_delay_ms
    );
    println!("Progress every {} VINs", config.pacing.progress_interval);

    println!("\nListing queries ({}):", config.search.partitions.len());
    for partition in &config.search.partitions {
        let url = api.listings_url(&target, partition, config.search.page_limit);
        println!("  - {}", redact_url(&url));
    }

    println!("\nHistory query template:");
    println!("  - {}", redact_url(&api.history_url("VIN")));

    println!("\nOutput:");
    println!("  Listings: {}", config.output.listings_path);
    println!("  History: {}", config.output.history_path);
    println!(
        "  Summary: {} ({})",
        config.output.summary_path,
        if config.output.quote_fields {
            "quoted"
        } else {
            "raw comma-join"
        }
    );
    if let Some(report) = &config.output.report_path {
        println!("  Report: {}", report);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --from-snapshots mode: rebuilds the summary offline
fn handle_rebuild(config: Config, config_hash: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut harvester = Harvester::new(config)?.with_config_hash(config_hash);

    match harvester.rebuild_from_snapshots() {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Rebuild failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    config_hash: String,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Partitions: {}, page limit: {}, history delay: {}ms",
        config.search.partitions.join(","),
        config.search.page_limit,
        config.pacing.history_delay_ms
    );

    let mut harvester = Harvester::new(config)?.with_config_hash(config_hash);

    match harvester.run().await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
