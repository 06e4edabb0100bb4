//! Remote fetch client
//!
//! One GET per call, the whole body buffered, then decoded as JSON. Failures are
//! split into transport problems (connection, timeout, HTTP status) and decode
//! problems (the body is not what the remote documents). Nothing is retried
//! here; callers decide what a failure means for their unit of work.

use crate::config::ApiConfig;
use crate::FetchError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Query parameter carrying the access credential
pub const CREDENTIAL_PARAM: &str = "api_key";

/// Builds an HTTP client with the configured timeouts
///
/// # Example
///
/// ```no_run
/// use vin_ledger::config::ApiConfig;
/// use vin_ledger::harvest::build_http_client;
///
/// let config = ApiConfig {
///     base_url: "https://api.marketcheck.com/v2".to_string(),
///     api_key: "key".to_string(),
///     timeout_secs: 30,
///     connect_timeout_secs: 10,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and decodes the buffered body as `T`
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection refused, DNS, TLS, timeout | `FetchError::Transport` |
/// | Body interrupted while reading | `FetchError::Transport` |
/// | Non-2xx status | `FetchError::Status` |
/// | Body is not valid JSON for `T` | `FetchError::Decode` |
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T, FetchError> {
    let shown = redact_url(url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: shown.clone(),
            source: source.without_url(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: shown,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::Transport {
            url: shown.clone(),
            source: source.without_url(),
        })?;

    tracing::trace!("Received {} bytes from {}", body.len(), shown);

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url: shown, source })
}

/// Renders a URL for logs with the credential value masked
pub fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == CREDENTIAL_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == CREDENTIAL_PARAM {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
