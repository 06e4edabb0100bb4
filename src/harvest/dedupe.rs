//! VIN deduplication
//!
//! Overlapping partitions return the same vehicle more than once. Only the
//! first listing seen for a VIN is retained for the downstream join.

use crate::model::Listing;
use std::collections::HashMap;

/// Unique VINs and their first-seen listings
#[derive(Debug, Clone, Default)]
pub struct DedupedListings {
    /// Unique VINs in first-occurrence order
    pub vins: Vec<String>,

    /// VIN to the first listing observed for it
    pub by_vin: HashMap<String, Listing>,

    /// Listings dropped from the identifier set for lack of a VIN
    pub without_vin: usize,
}

impl DedupedListings {
    pub fn listing(&self, vin: &str) -> Option<&Listing> {
        self.by_vin.get(vin)
    }

    pub fn len(&self) -> usize {
        self.vins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vins.is_empty()
    }
}

/// Reduces a listing collection to unique VINs, first occurrence wins
pub fn dedupe(listings: &[Listing]) -> DedupedListings {
    let mut deduped = DedupedListings::default();

    for listing in listings {
        let Some(vin) = listing.identity() else {
            deduped.without_vin += 1;
            continue;
        };

        if deduped.by_vin.contains_key(vin) {
            continue;
        }

        deduped.vins.push(vin.to_string());
        deduped.by_vin.insert(vin.to_string(), listing.clone());
    }

    if deduped.without_vin > 0 {
        tracing::warn!(
            "{} listings had no VIN and were left out of enrichment",
            deduped.without_vin
        );
    }

    deduped
}
