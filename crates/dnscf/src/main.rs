// # dnscf - best-IP DNS synchronizer
//
// This binary is a THIN integration layer: all allocation, retry and
// reporting logic lives in dnscf-core.
//
// It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Wiring the HTTP candidate source and the Cloudflare provider
// 4. Running one synchronization pass and printing the summary
//
// ## Configuration
//
// Required:
// - `CF_API_TOKEN`: Cloudflare API token
// - `CF_ZONE_ID`: Zone ID
// - `CF_DNS_NAMES`: Comma-separated hostnames to manage
//
// Optional:
// - `DNSCF_SOURCE_URL`, `DNSCF_FETCH_TIMEOUT_SECS`, `DNSCF_FETCH_MAX_RETRIES`
// - `DNSCF_API_BASE`, `DNSCF_HTTP_TIMEOUT_SECS`
// - `DNSCF_MODE`: `live` (default) or `dry-run`
// - `DNSCF_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CF_API_TOKEN=your_token
// export CF_ZONE_ID=your_zone_id
// export CF_DNS_NAMES=a.example.com,b.example.com
//
// dnscf
// ```
//
// A run that finds no candidates, or too few, still exits 0: the summary is
// the report. Only configuration problems are fatal.

use anyhow::{Context, Result};
use dnscf_core::{RunReport, SyncConfig, SyncEngine};
use dnscf_provider_cloudflare::CloudflareProvider;
use dnscf_source_http::HttpCandidateSource;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnscfExitCode {
    /// Run finished (including early stops with nothing to do)
    Finished = 0,
    /// Configuration error
    ConfigError = 1,
    /// Runtime error (unexpected)
    RuntimeError = 2,
}

impl From<DnscfExitCode> for ExitCode {
    fn from(code: DnscfExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Load and validate configuration from environment
    let config = match SyncConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return DnscfExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DnscfExitCode::ConfigError.into();
    }

    info!("Starting dnscf");
    info!("Configuration loaded: {} hostname(s)", config.hostnames.len());

    // One pass, strictly sequential
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DnscfExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&config)) {
        Ok(report) => {
            println!("{}", report);
            DnscfExitCode::Finished.into()
        }
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e).into()
        }
    }
}

/// Wire the components and run one synchronization pass
async fn run(config: &SyncConfig) -> Result<RunReport> {
    let source = HttpCandidateSource::from_config(&config.source)
        .context("Failed to create candidate source")?;
    let provider =
        CloudflareProvider::from_config(config).context("Failed to create Cloudflare provider")?;

    let engine = SyncEngine::new(Box::new(source), Box::new(provider), config)?;
    Ok(engine.run().await)
}

fn exit_code_for(err: &anyhow::Error) -> DnscfExitCode {
    match err.downcast_ref::<dnscf_core::Error>() {
        Some(dnscf_core::Error::Config(_)) => DnscfExitCode::ConfigError,
        _ => DnscfExitCode::RuntimeError,
    }
}

fn log_level(name: &str) -> Level {
    match name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
