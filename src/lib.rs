//! vin-ledger: a paced used-vehicle listing and price-history harvester
//!
//! This crate collects recent marketplace listings for a make/model/year across
//! region partitions, enriches each unique VIN with its price history, and
//! writes JSON snapshots plus a derived CSV summary.

pub mod config;
pub mod harvest;
pub mod model;
pub mod output;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vin-ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Broad class of a fetch failure
///
/// `Transport` failures may succeed on a later attempt. `Decode` failures mean
/// the remote answered with something that breaks its documented contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Transport,
    Decode,
}

/// Errors raised by a single remote fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport failure for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response body from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Classifies this failure as transport-level or a decode violation
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => FetchErrorKind::Transport,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }
}

/// Errors raised while persisting or re-reading an output artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write CSV {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type alias for vin-ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for artifact operations
pub type ArtifactResult<T> = std::result::Result<T, ArtifactError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{run_harvest, Harvester};
pub use model::{HistoryRecord, Listing, SummaryRow, VehicleHistory};
