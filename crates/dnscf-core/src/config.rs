//! Configuration for the dnscf synchronizer
//!
//! Configuration is read once at startup from the environment, validated
//! eagerly, and then handed to each component by value or reference. All
//! problems are collected and reported together in a single
//! [`Error::Config`].
//!
//! ## Environment
//!
//! Required:
//! - `CF_API_TOKEN`: Cloudflare API token with Zone:DNS:Edit permission
//! - `CF_ZONE_ID`: Zone identifier
//! - `CF_DNS_NAMES`: Comma-separated hostnames to manage
//!
//! Optional:
//! - `DNSCF_SOURCE_URL`: Candidate list URL
//! - `DNSCF_FETCH_TIMEOUT_SECS`: Per-attempt timeout for the candidate fetch
//! - `DNSCF_FETCH_MAX_RETRIES`: Candidate fetch attempt budget
//! - `DNSCF_HTTP_TIMEOUT_SECS`: Timeout for provider API requests
//! - `DNSCF_API_BASE`: Provider API base URL
//! - `DNSCF_MODE`: `live` or `dry-run`
//! - `DNSCF_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_API_TOKEN: &str = "CF_API_TOKEN";
pub const ENV_ZONE_ID: &str = "CF_ZONE_ID";
pub const ENV_DNS_NAMES: &str = "CF_DNS_NAMES";
pub const ENV_SOURCE_URL: &str = "DNSCF_SOURCE_URL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DNSCF_FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_RETRIES: &str = "DNSCF_FETCH_MAX_RETRIES";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "DNSCF_HTTP_TIMEOUT_SECS";
pub const ENV_API_BASE: &str = "DNSCF_API_BASE";
pub const ENV_MODE: &str = "DNSCF_MODE";
pub const ENV_LOG_LEVEL: &str = "DNSCF_LOG_LEVEL";

/// Default candidate list endpoint
pub const DEFAULT_SOURCE_URL: &str = "https://ip.164746.xyz/ipTop.html";

/// Cloudflare API v4 base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_MAX_RETRIES: usize = 5;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Complete configuration for one synchronization run
#[derive(Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    #[serde(skip_serializing, default)]
    pub api_token: String,

    /// Zone holding the managed records
    pub zone_id: String,

    /// Hostnames to manage, in allocation order
    pub hostnames: Vec<String>,

    /// Candidate source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Provider API settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level name
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Custom Debug implementation that hides the API token
impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("hostnames", &self.hostnames)
            .field("source", &self.source)
            .field("provider", &self.provider)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Candidate source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL returning the comma-separated candidate list
    pub url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of fetch attempts
    #[serde(default = "default_fetch_max_retries")]
    pub max_retries: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: default_fetch_timeout_secs(),
            max_retries: default_fetch_max_retries(),
        }
    }
}

/// Provider API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    /// Live or dry-run
    #[serde(default)]
    pub mode: RunMode,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: default_http_timeout_secs(),
            mode: RunMode::Live,
        }
    }
}

/// Whether record updates are actually sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Send updates
    #[default]
    Live,
    /// Perform reads, log updates without sending them
    DryRun,
}

impl RunMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "live" => Some(RunMode::Live),
            "dry-run" | "dryrun" | "dry_run" => Some(RunMode::DryRun),
            _ => None,
        }
    }
}

impl SyncConfig {
    /// Load and validate configuration from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary key lookup
    ///
    /// Every missing or malformed value is collected before failing, so a
    /// single error lists all problems.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        let mut required = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                problems.push(format!("{key} is required"));
                String::new()
            }
        };

        let api_token = required(ENV_API_TOKEN);
        let zone_id = required(ENV_ZONE_ID);
        let names = required(ENV_DNS_NAMES);

        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut source = SourceConfig::default();
        if let Some(url) = optional(ENV_SOURCE_URL) {
            source.url = url.trim().to_string();
        }
        if let Some(raw) = optional(ENV_FETCH_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => source.timeout_secs = secs,
                Err(_) => problems.push(format!("{ENV_FETCH_TIMEOUT_SECS} is not a number: {raw}")),
            }
        }
        if let Some(raw) = optional(ENV_FETCH_MAX_RETRIES) {
            match raw.trim().parse::<usize>() {
                Ok(n) => source.max_retries = n,
                Err(_) => problems.push(format!("{ENV_FETCH_MAX_RETRIES} is not a number: {raw}")),
            }
        }

        let mut provider = ProviderConfig::default();
        if let Some(base) = optional(ENV_API_BASE) {
            provider.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = optional(ENV_HTTP_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => provider.timeout_secs = secs,
                Err(_) => problems.push(format!("{ENV_HTTP_TIMEOUT_SECS} is not a number: {raw}")),
            }
        }
        if let Some(raw) = optional(ENV_MODE) {
            match RunMode::parse(&raw) {
                Some(mode) => provider.mode = mode,
                None => problems.push(format!(
                    "{ENV_MODE} '{raw}' is not valid. Valid modes: live, dry-run"
                )),
            }
        }

        let config = Self {
            api_token,
            zone_id,
            hostnames: parse_hostnames(&names),
            source,
            provider,
            log_level: optional(ENV_LOG_LEVEL)
                .map(|level| level.trim().to_lowercase())
                .unwrap_or_else(default_log_level),
        };

        // Skip value checks for fields already reported as missing
        config.collect_problems(&mut problems, !names.is_empty());

        if problems.is_empty() {
            Ok(config)
        } else {
            Err(Error::config(problems.join("; ")))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        let mut problems = Vec::new();
        if self.api_token.is_empty() {
            problems.push(format!("{ENV_API_TOKEN} is required"));
        }
        if self.zone_id.is_empty() {
            problems.push(format!("{ENV_ZONE_ID} is required"));
        }
        self.collect_problems(&mut problems, true);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::config(problems.join("; ")))
        }
    }

    /// Whether updates are logged instead of sent
    pub fn is_dry_run(&self) -> bool {
        self.provider.mode == RunMode::DryRun
    }

    fn collect_problems(&self, problems: &mut Vec<String>, check_hostnames: bool) {
        if check_hostnames {
            if self.hostnames.is_empty() {
                problems.push(format!(
                    "{ENV_DNS_NAMES} must contain at least one hostname. \
                    Set it via: export {ENV_DNS_NAMES}=a.example.com,b.example.com"
                ));
            }
            for hostname in &self.hostnames {
                if let Err(e) = validate_hostname(hostname) {
                    problems.push(e);
                }
            }
        }

        for (key, url) in [
            (ENV_SOURCE_URL, &self.source.url),
            (ENV_API_BASE, &self.provider.api_base),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                problems.push(format!("{key} must use HTTP or HTTPS scheme. Got: {url}"));
            }
        }

        if !(1..=300).contains(&self.source.timeout_secs) {
            problems.push(format!(
                "{ENV_FETCH_TIMEOUT_SECS} must be between 1 and 300 seconds. Got: {}",
                self.source.timeout_secs
            ));
        }
        if !(1..=20).contains(&self.source.max_retries) {
            problems.push(format!(
                "{ENV_FETCH_MAX_RETRIES} must be between 1 and 20. Got: {}",
                self.source.max_retries
            ));
        }
        if !(1..=300).contains(&self.provider.timeout_secs) {
            problems.push(format!(
                "{ENV_HTTP_TIMEOUT_SECS} must be between 1 and 300 seconds. Got: {}",
                self.provider.timeout_secs
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => problems.push(format!(
                "{ENV_LOG_LEVEL} '{other}' is not valid. \
                Valid levels: trace, debug, info, warn, error"
            )),
        }
    }
}

/// Split a comma-separated hostname list, trimming whitespace
///
/// Order is kept; empty entries are dropped.
pub fn parse_hostnames(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Basic DNS name validation (RFC 1035 lengths and label characters)
///
/// A leading `*` label is accepted for wildcard records.
fn validate_hostname(hostname: &str) -> Result<(), String> {
    if hostname.len() > 253 {
        return Err(format!(
            "Hostname too long: {} chars (max 253). Got: {}",
            hostname.len(),
            hostname
        ));
    }

    for (index, label) in hostname.split('.').enumerate() {
        if label.is_empty() {
            return Err(format!("Hostname has empty label: '{hostname}'"));
        }
        if index == 0 && label == "*" {
            continue;
        }
        if label.len() > 63 {
            return Err(format!(
                "Hostname label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            ));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!(
                "Hostname label contains invalid characters. Label: '{label}'"
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!(
                "Hostname label cannot start or end with hyphen. Label: '{label}'"
            ));
        }
    }

    Ok(())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_fetch_max_retries() -> usize {
    DEFAULT_FETCH_MAX_RETRIES
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
