//! Candidate IP list and the bounded fetch loop
//!
//! The source publishes a single comma-separated body such as
//! `1.1.1.1,2.2.2.2,3.3.3.3`. Order is significant and preserved; duplicates
//! are kept.

use crate::error::{Error, Result};
use crate::traits::CandidateSource;
use std::net::IpAddr;
use tracing::{debug, info, warn};

/// Ordered list of candidate IP addresses for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    ips: Vec<IpAddr>,
}

impl CandidateList {
    /// Parse a comma-separated response body
    ///
    /// Tokens are trimmed; empty tokens are ignored. Only IPv4 addresses can
    /// be written to A records, so IPv6 addresses and tokens that are not
    /// addresses at all are dropped with a warning.
    pub fn parse(body: &str) -> Self {
        let ips = body
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| match token.parse::<IpAddr>() {
                Ok(ip) if ip.is_ipv4() => Some(ip),
                Ok(ip) => {
                    warn!("Ignoring IPv6 candidate address: {}", ip);
                    None
                }
                Err(_) => {
                    warn!("Ignoring invalid candidate address: {:?}", token);
                    None
                }
            })
            .collect();

        Self { ips }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Iterate over the candidates in order
    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.ips.iter()
    }

    /// Borrow the candidates as a slice
    pub fn as_slice(&self) -> &[IpAddr] {
        &self.ips
    }
}

impl From<Vec<IpAddr>> for CandidateList {
    fn from(ips: Vec<IpAddr>) -> Self {
        Self { ips }
    }
}

/// Fetch and parse the candidate list, making at most `max_retries` attempts
///
/// Returns on the first successful attempt. Failed attempts are logged and
/// the next attempt starts immediately, there is no backoff.
///
/// # Returns
///
/// - `Ok(CandidateList)`: Parsed body of the first successful attempt
/// - `Err(Error::SourceExhausted)`: Every attempt failed
pub async fn fetch_candidates(
    source: &dyn CandidateSource,
    max_retries: usize,
) -> Result<CandidateList> {
    let mut last_error = None;

    for attempt in 1..=max_retries {
        debug!(
            "Fetching candidates from {} (attempt {}/{})",
            source.source_name(),
            attempt,
            max_retries
        );

        match source.fetch().await {
            Ok(body) => {
                let candidates = CandidateList::parse(&body);
                info!(
                    "Fetched {} candidate IP(s) from {}",
                    candidates.len(),
                    source.source_name()
                );
                return Ok(candidates);
            }
            Err(e) => {
                warn!(
                    "Candidate fetch failed (attempt {}/{}): {}",
                    attempt, max_retries, e
                );
                last_error = Some(e);
            }
        }
    }

    Err(Error::SourceExhausted {
        attempts: max_retries,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts made".to_string()),
    })
}
