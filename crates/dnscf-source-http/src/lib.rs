// # HTTP Candidate Source
//
// This crate provides the HTTP-based candidate source for the dnscf
// synchronizer.
//
// ## Behavior
//
// Each call to `fetch()` performs exactly one GET against the configured URL
// (by default `https://ip.164746.xyz/ipTop.html`) and returns the body as-is.
// The client carries a fixed per-attempt timeout. Retrying is the caller's
// job: see `dnscf_core::fetch_candidates`.

use dnscf_core::config::SourceConfig;
use dnscf_core::traits::CandidateSource;
use dnscf_core::{Error, Result};

use std::time::Duration;

/// HTTP-based candidate source
#[derive(Debug, Clone)]
pub struct HttpCandidateSource {
    /// URL to fetch the candidate list from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpCandidateSource {
    /// Create a new HTTP candidate source
    ///
    /// # Parameters
    ///
    /// - `url`: URL returning a comma-separated list of IPs
    /// - `timeout`: Per-attempt request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create from the source section of the run configuration
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// The URL this source fetches from
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CandidateSource for HttpCandidateSource {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::source(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::source(format!("HTTP error: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::source(format!("Failed to read response: {e}")))?;

        tracing::debug!("Candidate source returned {} byte(s)", body.len());
        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
