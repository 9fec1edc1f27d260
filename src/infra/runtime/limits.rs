use std::time::Duration;

use crate::infra::config::{NasaConfig, DEFAULT_TIMEOUT_SECS};

/// Cap on connection setup; the overall request timeout still bounds it.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build a reqwest client with the default 30s request timeout.
pub fn make_http_client() -> Result<reqwest::Client, reqwest::Error> {
    client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Build a reqwest client honoring the configured request timeout.
pub fn make_http_client_with(cfg: &NasaConfig) -> Result<reqwest::Client, reqwest::Error> {
    client_with_timeout(Duration::from_secs(cfg.timeout_secs))
}

fn client_with_timeout(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
        .timeout(timeout)
        .build()
}
