use serde::Deserialize;

/// Main configuration structure for vin-ledger
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote marketplace API access
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the versioned API, without a trailing endpoint
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Access credential sent as the `api_key` query parameter
    #[serde(rename = "api-key", default)]
    pub api_key: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Which vehicles to look for and where
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub make: String,
    pub model: String,
    pub year: u16,

    /// Region partitions queried one after another (e.g. state codes)
    pub partitions: Vec<String>,

    /// Maximum listings requested per partition
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,
}

/// History enrichment pacing
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Fixed wait before every history request (milliseconds)
    #[serde(rename = "history-delay-ms", default = "default_history_delay_ms")]
    pub history_delay_ms: u64,

    /// Emit a progress notice every this many processed VINs
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            history_delay_ms: default_history_delay_ms(),
            progress_interval: default_progress_interval(),
        }
    }
}

/// Artifact locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Raw collected listings snapshot (JSON)
    #[serde(rename = "listings-path", default = "default_listings_path")]
    pub listings_path: String,

    /// VIN history snapshot (JSON)
    #[serde(rename = "history-path", default = "default_history_path")]
    pub history_path: String,

    /// Derived summary table (CSV)
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,

    /// Markdown run report; omitted when unset
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,

    /// Quote summary fields containing delimiters instead of joining them raw
    #[serde(rename = "quote-fields", default = "default_quote_fields")]
    pub quote_fields: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            listings_path: default_listings_path(),
            history_path: default_history_path(),
            summary_path: default_summary_path(),
            report_path: None,
            quote_fields: default_quote_fields(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.marketcheck.com/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_limit() -> u32 {
    100
}

fn default_history_delay_ms() -> u64 {
    200
}

fn default_progress_interval() -> usize {
    10
}

fn default_listings_path() -> String {
    "marketcheck-listings.json".to_string()
}

fn default_history_path() -> String {
    "marketcheck-history.json".to_string()
}

fn default_summary_path() -> String {
    "marketcheck-summary.csv".to_string()
}

fn default_quote_fields() -> bool {
    true
}
