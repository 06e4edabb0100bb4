//! The remote data source seam
//!
//! The collector and enricher only need two operations from the marketplace.
//! `MarketApi` is the production implementation; tests substitute their own.

use crate::harvest::api::{MarketApi, SearchTarget};
use crate::model::{HistoryRecord, ListingPage};
use crate::FetchError;
use std::future::Future;

/// Source of listing pages and VIN histories
pub trait MarketSource {
    /// Fetches one page of recent listings for a partition
    fn recent_listings(
        &self,
        target: &SearchTarget,
        partition: &str,
        limit: u32,
    ) -> impl Future<Output = Result<ListingPage, FetchError>> + Send;

    /// Fetches the history of a VIN, most recent record first
    fn history(&self, vin: &str) -> impl Future<Output = Result<Vec<HistoryRecord>, FetchError>> + Send;
}

impl MarketSource for MarketApi {
    async fn recent_listings(
        &self,
        target: &SearchTarget,
        partition: &str,
        limit: u32,
    ) -> Result<ListingPage, FetchError> {
        self.fetch_recent_listings(target, partition, limit).await
    }

    async fn history(&self, vin: &str) -> Result<Vec<HistoryRecord>, FetchError> {
        self.fetch_history(vin).await
    }
}
