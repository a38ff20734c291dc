//! Test doubles and common utilities for contract tests
//!
//! These doubles script remote behavior and record every call so tests can
//! assert exactly which requests a run would have issued.

#![allow(dead_code)]

use dnscf_core::config::{ENV_API_TOKEN, ENV_DNS_NAMES, ENV_FETCH_MAX_RETRIES, ENV_ZONE_ID};
use dnscf_core::error::{Error, Result};
use dnscf_core::traits::{CandidateSource, DnsProvider, UpdateStatus};
use dnscf_core::SyncConfig;
use std::collections::{HashMap, HashSet, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A CandidateSource that replays a fixed script of attempt results
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<String>>>,
    /// Call counter for fetch()
    fetch_call_count: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Replay `script` in order; attempts past its end fail
    pub fn new(script: Vec<Result<String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Succeed on the first attempt with `body`
    pub fn succeeding(body: &str) -> Self {
        Self::new(vec![Ok(body.to_string())])
    }

    /// Fail `failures` times, then succeed with `body`
    pub fn failing_then(failures: usize, body: &str) -> Self {
        let mut script: Vec<Result<String>> = (0..failures)
            .map(|i| Err(Error::source(format!("HTTP error: 503 (scripted failure {})", i + 1))))
            .collect();
        script.push(Ok(body.to_string()));
        Self::new(script)
    }

    /// Shared handle to the fetch() call counter
    pub fn fetch_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_call_count)
    }
}

#[async_trait::async_trait]
impl CandidateSource for ScriptedSource {
    async fn fetch(&self) -> Result<String> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::source("connection refused")))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Calls observed by a RecordingProvider
#[derive(Debug, Default, Clone)]
pub struct ProviderCalls {
    /// Hostnames passed to list_records(), in order
    pub lookups: Vec<String>,
    /// (record_id, hostname, ip) passed to update_record(), in order
    pub updates: Vec<(String, String, IpAddr)>,
}

/// A DnsProvider backed by an in-memory zone that records every call
#[derive(Default)]
pub struct RecordingProvider {
    records: HashMap<String, Vec<String>>,
    failing_lookups: HashMap<String, u16>,
    garbled_listings: HashSet<String>,
    failing_updates: HashMap<String, UpdateStatus>,
    calls: Arc<Mutex<ProviderCalls>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `hostname` the listed record ids
    pub fn with_records(mut self, hostname: &str, ids: &[&str]) -> Self {
        self.records.insert(
            hostname.to_string(),
            ids.iter().map(ToString::to_string).collect(),
        );
        self
    }

    /// Make the record lookup for `hostname` fail with `status`
    pub fn with_failed_lookup(mut self, hostname: &str, status: u16) -> Self {
        self.failing_lookups.insert(hostname.to_string(), status);
        self
    }

    /// Make the record listing for `hostname` come back as non-JSON
    pub fn with_garbled_listing(mut self, hostname: &str) -> Self {
        self.garbled_listings.insert(hostname.to_string());
        self
    }

    /// Make the update of `record_id` return `status`
    pub fn with_failed_update(mut self, record_id: &str, status: UpdateStatus) -> Self {
        self.failing_updates.insert(record_id.to_string(), status);
        self
    }

    /// Shared handle to the observed calls
    pub fn calls(&self) -> Arc<Mutex<ProviderCalls>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingProvider {
    async fn list_records(&self, hostname: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().lookups.push(hostname.to_string());

        if let Some(status) = self.failing_lookups.get(hostname) {
            return Err(Error::api(*status, "{\"success\":false}"));
        }
        if self.garbled_listings.contains(hostname) {
            let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
            return Err(err.into());
        }
        Ok(self.records.get(hostname).cloned().unwrap_or_default())
    }

    async fn update_record(&self, record_id: &str, hostname: &str, ip: IpAddr) -> UpdateStatus {
        self.calls.lock().unwrap().updates.push((
            record_id.to_string(),
            hostname.to_string(),
            ip,
        ));

        self.failing_updates
            .get(record_id)
            .cloned()
            .unwrap_or(UpdateStatus::Updated { ip })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Helper to create a minimal SyncConfig for testing
pub fn minimal_config(hostnames: &str) -> SyncConfig {
    config_with_retries(hostnames, 5)
}

/// Helper to create a SyncConfig with a specific fetch attempt budget
pub fn config_with_retries(hostnames: &str, max_retries: usize) -> SyncConfig {
    let pairs: HashMap<&str, String> = HashMap::from([
        (ENV_API_TOKEN, "test-token".to_string()),
        (ENV_ZONE_ID, "test-zone".to_string()),
        (ENV_DNS_NAMES, hostnames.to_string()),
        (ENV_FETCH_MAX_RETRIES, max_retries.to_string()),
    ]);
    SyncConfig::from_lookup(|key| pairs.get(key).cloned()).expect("valid test config")
}

/// Parse an IPv4 literal
pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid IP literal")
}
