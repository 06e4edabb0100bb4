//! Explicit per-unit outcomes
//!
//! Every partition fetch and every VIN enrichment ends in either a result or a
//! recorded skip. Skips carry the reason so the run report can say exactly why
//! a unit contributed nothing.

use crate::{FetchError, FetchErrorKind};
use std::fmt;

/// Why a unit of work contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Connection, timeout or HTTP status failure
    Transport(String),

    /// The remote answered with a body that does not decode
    Decode(String),

    /// The remote returned no history records for the VIN
    EmptyHistory,

    /// No retained listing exists for a VIN that has history
    MissingListing,
}

impl SkipReason {
    /// Short stable label used when grouping skips
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::Transport(_) => "transport",
            SkipReason::Decode(_) => "decode",
            SkipReason::EmptyHistory => "empty-history",
            SkipReason::MissingListing => "missing-listing",
        }
    }
}

impl From<&FetchError> for SkipReason {
    fn from(error: &FetchError) -> Self {
        match error.kind() {
            FetchErrorKind::Transport => SkipReason::Transport(error.to_string()),
            FetchErrorKind::Decode => SkipReason::Decode(error.to_string()),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Transport(msg) => write!(f, "transport: {}", msg),
            SkipReason::Decode(msg) => write!(f, "decode: {}", msg),
            SkipReason::EmptyHistory => write!(f, "no history records returned"),
            SkipReason::MissingListing => write!(f, "no retained listing for VIN"),
        }
    }
}

/// A unit (partition code or VIN) that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub key: String,
    pub reason: SkipReason,
}

impl SkippedUnit {
    pub fn new(key: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

/// Outcome of fetching one listing partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionOutcome {
    Fetched {
        partition: String,
        /// Total matches the remote reported for the partition
        reported_total: u64,
        /// Listings actually returned on the page
        returned: usize,
    },
    Skipped {
        partition: String,
        reason: SkipReason,
    },
}

impl PartitionOutcome {
    pub fn partition(&self) -> &str {
        match self {
            PartitionOutcome::Fetched { partition, .. } => partition,
            PartitionOutcome::Skipped { partition, .. } => partition,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, PartitionOutcome::Fetched { .. })
    }
}
