// # DNS Provider Trait
//
// Defines the interface for listing and overwriting address records via a
// provider API.
//
// ## Implementations
//
// - Cloudflare: `dnscf-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use dnscf_core::DnsProvider;
//
// let provider = /* DnsProvider implementation */;
//
// let ids = provider.list_records("a.example.com").await?;
// for id in &ids {
//     let status = provider
//         .update_record(id, "a.example.com", "1.1.1.1".parse()?)
//         .await;
//     println!("{status:?}");
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

/// Result of a single record overwrite
///
/// Failures are values, not errors: the engine records them and moves on to
/// the next record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Record now points at the given IP
    Updated {
        /// The IP written to the record
        ip: IpAddr,
    },
    /// Dry-run mode: the update was logged but not sent
    DryRun {
        /// The IP that would have been written
        ip: IpAddr,
    },
    /// The provider answered with a non-success status
    HttpError {
        /// HTTP status code
        status: u16,
    },
    /// The request never produced a response
    TransportError {
        /// Transport failure description
        detail: String,
    },
}

impl UpdateStatus {
    /// Whether the record was (or, in dry-run mode, would have been) updated
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateStatus::Updated { .. } | UpdateStatus::DryRun { .. })
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStatus::Updated { ip } => write!(f, "updated to {ip}"),
            UpdateStatus::DryRun { ip } => write!(f, "would update to {ip} (dry-run)"),
            UpdateStatus::HttpError { status } => write!(f, "update failed with status {status}"),
            UpdateStatus::TransportError { detail } => write!(f, "update failed: {detail}"),
        }
    }
}

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// Providers are isolated and single-shot:
/// - ✅ One HTTP request per call
/// - ✅ Parse provider-specific responses
/// - ❌ No retry or backoff
/// - ❌ No caching between calls
/// - ❌ No decision about which IP goes to which record (owned by the allocator)
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the identifiers of all address records named exactly `hostname`
    ///
    /// Identifiers are returned in the order the provider lists them.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: Matching record ids, possibly empty
    /// - `Err(Error)`: The lookup request failed
    async fn list_records(&self, hostname: &str) -> Result<Vec<String>, crate::Error>;

    /// Overwrite one record so that `hostname` resolves to `ip`
    ///
    /// Never fails: transport and status problems are folded into the
    /// returned [`UpdateStatus`].
    async fn update_record(&self, record_id: &str, hostname: &str, ip: IpAddr) -> UpdateStatus;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
