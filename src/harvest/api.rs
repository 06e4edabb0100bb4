//! Marketplace endpoints
//!
//! Wraps the HTTP client with the base URL and credential, and knows how to
//! build the recent-listings and VIN-history queries.

use crate::config::ApiConfig;
use crate::harvest::fetcher::{build_http_client, fetch_json, redact_url, CREDENTIAL_PARAM};
use crate::model::{HistoryRecord, ListingPage};
use crate::{ConfigError, FetchError, LedgerError};
use reqwest::Client;
use url::Url;

/// Target vehicle for a listings query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub make: String,
    pub model: String,
    pub year: u16,
}

/// Client for the two marketplace endpoints the pipeline uses
#[derive(Debug, Clone)]
pub struct MarketApi {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl MarketApi {
    /// Creates an API client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, LedgerError> {
        let client = build_http_client(config)?;
        Self::with_client(client, config)
    }

    /// Creates an API client around an existing HTTP client
    pub fn with_client(client: Client, config: &ApiConfig) -> Result<Self, LedgerError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Builds the recent-listings query for one partition
    pub fn listings_url(&self, target: &SearchTarget, partition: &str, limit: u32) -> Url {
        let mut url = self.endpoint(&["search", "car", "recents"]);
        url.query_pairs_mut()
            .append_pair(CREDENTIAL_PARAM, &self.api_key)
            .append_pair("make", &target.make)
            .append_pair("model", &target.model)
            .append_pair("year", &target.year.to_string())
            .append_pair("state", partition)
            .append_pair("limit", &limit.to_string());
        url
    }

    /// Builds the history query for one VIN
    pub fn history_url(&self, vin: &str) -> Url {
        let mut url = self.endpoint(&["history", "car", vin]);
        url.query_pairs_mut()
            .append_pair(CREDENTIAL_PARAM, &self.api_key);
        url
    }

    /// Fetches one page of recent listings for a partition
    pub async fn fetch_recent_listings(
        &self,
        target: &SearchTarget,
        partition: &str,
        limit: u32,
    ) -> Result<ListingPage, FetchError> {
        let url = self.listings_url(target, partition, limit);
        tracing::debug!("GET {}", redact_url(&url));
        fetch_json(&self.client, &url).await
    }

    /// Fetches the price history of a VIN, most recent record first
    pub async fn fetch_history(&self, vin: &str) -> Result<Vec<HistoryRecord>, FetchError> {
        let url = self.history_url(vin);
        tracing::debug!("GET {}", redact_url(&url));
        fetch_json(&self.client, &url).await
    }

    // Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
