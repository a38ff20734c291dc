// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for the dnscf synchronizer.
//
// ## Behavior
//
// - One HTTP request per call, no retry, no caching
// - `list_records`: lists the zone's records and keeps exact name matches
// - `update_record`: overwrites one record with `{type, name, content}`
// - Dry-run mode performs the listing but only logs the PUT payload
// - HTTP timeout configured on the client
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Construction fails fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

mod types;

use async_trait::async_trait;
use dnscf_core::config::{RunMode, SyncConfig};
use dnscf_core::traits::{DnsProvider, UpdateStatus};
use dnscf_core::{Error, Result};
use reqwest::StatusCode;
use std::net::IpAddr;
use std::time::Duration;

use types::{DnsRecordList, RecordUpdate};

/// Cloudflare DNS provider
///
/// # Trust Level: Untrusted
///
/// This provider is isolated, stateless, and single-shot. Deciding which IP
/// goes to which record is owned by the allocator in `dnscf-core`.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform all GET requests (record listing)
/// - Log the intended PUT payload
/// - **NOT** actually modify DNS records
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Zone holding the managed records
    zone_id: String,

    /// API base URL, without trailing slash
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip PUT updates
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `zone_id`: Zone holding the managed records
    /// - `api_base`: API base URL (normally `https://api.cloudflare.com/client/v4`)
    /// - `timeout`: Per-request timeout
    /// - `dry_run`: If true, perform GET requests but skip PUT updates
    pub fn new(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let zone_id = zone_id.into();
        if zone_id.is_empty() {
            return Err(Error::config("Cloudflare zone ID cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_token,
            zone_id,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
            dry_run,
        })
    }

    /// Create a provider from the run configuration
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        let dry_run = config.provider.mode == RunMode::DryRun;
        if dry_run {
            tracing::warn!("Cloudflare provider running in DRY-RUN mode - no changes will be made");
        }

        Self::new(
            config.api_token.clone(),
            config.zone_id.clone(),
            config.provider.api_base.clone(),
            Duration::from_secs(config.provider.timeout_secs),
            dry_run,
        )
    }

    /// Whether updates are logged instead of sent
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, self.zone_id)
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/{}", self.records_url(), record_id)
    }
}

/// Map a non-success status to a descriptive API error
fn status_error(status: StatusCode, body: &str, action: &str) -> Error {
    let message = match status.as_u16() {
        401 | 403 => {
            "Authentication failed: Invalid API token or insufficient permissions".to_string()
        }
        404 => "Zone or record not found".to_string(),
        429 => "Rate limit exceeded. Please retry later".to_string(),
        500..=599 => format!("Cloudflare server error (transient): {body}"),
        _ => format!("{action} failed: {body}"),
    };
    Error::api(status.as_u16(), message)
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// List record ids named exactly `hostname`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records
    /// Authorization: Bearer <token>
    /// ```
    async fn list_records(&self, hostname: &str) -> Result<Vec<String>> {
        tracing::debug!("Listing DNS records for {}", hostname);

        let response = self
            .client
            .get(self.records_url())
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::http(format!("Record listing request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::warn!("Error fetching DNS records for {}: {}", hostname, error_text);
            return Err(status_error(status, &error_text, "Record listing"));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read record listing: {e}")))?;
        let listing: DnsRecordList = serde_json::from_str(&body)?;

        let ids: Vec<String> = listing
            .result
            .into_iter()
            .filter(|record| record.name == hostname)
            .map(|record| record.id)
            .collect();

        tracing::debug!("Found {} record(s) named {}", ids.len(), hostname);
        Ok(ids)
    }

    /// Overwrite one record
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// {
    ///   "type": "A",
    ///   "name": "a.example.com",
    ///   "content": "1.2.3.4"
    /// }
    /// ```
    async fn update_record(&self, record_id: &str, hostname: &str, ip: IpAddr) -> UpdateStatus {
        let payload = RecordUpdate::new(hostname, ip);
        let url = self.record_url(record_id);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PUT request to {} with payload: {}",
                url,
                serde_json::to_string(&payload).unwrap_or_default()
            );
            return UpdateStatus::DryRun { ip };
        }

        tracing::debug!("Updating record {} ({}) -> {}", record_id, hostname, ip);

        let response = match self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return UpdateStatus::TransportError {
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            UpdateStatus::Updated { ip }
        } else {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("Update of {} rejected: {} - {}", record_id, status, error_text);
            UpdateStatus::HttpError {
                status: status.as_u16(),
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
