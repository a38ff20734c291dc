//! Core synchronization engine
//!
//! The SyncEngine runs one synchronization pass:
//! - Fetches candidate IPs via CandidateSource (bounded retry)
//! - Lists existing records per hostname via DnsProvider
//! - Allocates candidates to records
//! - Overwrites each record via DnsProvider
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ CandidateSource │─── CandidateList ───┐
//! └─────────────────┘                     │
//!                                         ▼
//!                                ┌──────────────┐
//!                                │  SyncEngine  │
//!                                └──────────────┘
//!                                         │
//!         ┌───────────────────────────────┼───────────────────────────┐
//!         │                               │                           │
//!         ▼                               ▼                           ▼
//! ┌──────────────┐               ┌──────────────┐             ┌─────────────┐
//! │ DnsProvider  │               │  allocate()  │             │ DnsProvider │
//! │ (list)       │               │              │             │ (update)    │
//! └──────────────┘               └──────────────┘             └─────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Fetch candidates; stop with `NoCandidates` if none
//! 2. List records for every hostname, skipping hostnames with none
//! 3. Stop with `InsufficientCandidates` if candidates cannot cover every record
//! 4. Update every record, collecting one outcome per record
//!
//! No record is touched before step 4, so an early stop never leaves the
//! zone half-updated.

use crate::allocation::{HostRecords, allocate, required_slots};
use crate::candidates::fetch_candidates;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::report::{ReportEntry, RunOutcome, RunReport, SkipReason, UpdateOutcome};
use crate::traits::{CandidateSource, DnsProvider};
use tracing::{debug, error, info, warn};

/// Core synchronization engine
///
/// ## Lifecycle
///
/// 1. Create with [`SyncEngine::new()`]
/// 2. Call [`SyncEngine::run()`] once
/// 3. Print the returned [`RunReport`]
///
/// ## Threading
///
/// Every network call is awaited in turn; the engine never spawns tasks.
pub struct SyncEngine {
    /// Source of candidate IPs
    source: Box<dyn CandidateSource>,

    /// DNS provider for listing and updating records
    provider: Box<dyn DnsProvider>,

    /// Hostnames to manage, in allocation order
    hostnames: Vec<String>,

    /// Candidate fetch attempt budget
    max_retries: usize,
}

impl SyncEngine {
    /// Create a new engine
    ///
    /// # Parameters
    ///
    /// - `source`: Candidate source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: Validated run configuration
    pub fn new(
        source: Box<dyn CandidateSource>,
        provider: Box<dyn DnsProvider>,
        config: &SyncConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            provider,
            hostnames: config.hostnames.clone(),
            max_retries: config.source.max_retries,
        })
    }

    /// Run one synchronization pass
    ///
    /// Never fails: every remote failure ends up in the returned report.
    pub async fn run(&self) -> RunReport {
        info!(
            "Starting sync of {} hostname(s) via {}",
            self.hostnames.len(),
            self.provider.provider_name()
        );

        let candidates = match fetch_candidates(self.source.as_ref(), self.max_retries).await {
            Ok(candidates) if candidates.is_empty() => {
                error!("No candidate IPs available: source returned no usable addresses");
                return RunReport::new(RunOutcome::NoCandidates {
                    reason: "source returned no usable addresses".to_string(),
                });
            }
            Ok(candidates) => candidates,
            Err(e) => {
                error!("No candidate IPs available: {}", e);
                return RunReport::new(RunOutcome::NoCandidates {
                    reason: e.to_string(),
                });
            }
        };

        let mut report = RunReport::new(RunOutcome::Completed);
        let hosts = self.collect_records(&mut report).await;

        let allocation = match allocate(&hosts, &candidates) {
            Ok(allocation) => allocation,
            Err(e) => {
                error!("{}; no records will be updated", e);
                report.outcome = RunOutcome::InsufficientCandidates {
                    required: required_slots(&hosts),
                    available: candidates.len(),
                };
                return report;
            }
        };

        debug!(
            "Allocated {} candidate(s), {} unused",
            allocation.assignments.len(),
            allocation.unused
        );

        for assignment in &allocation.assignments {
            let status = self
                .provider
                .update_record(&assignment.record_id, &assignment.hostname, assignment.ip)
                .await;

            let outcome = UpdateOutcome::now(&assignment.record_id, &assignment.hostname, status);
            if outcome.status.is_success() {
                info!("{}", outcome);
            } else {
                error!("{}", outcome);
            }
            report.entries.push(ReportEntry::Update(outcome));
        }

        if allocation.unused > 0 {
            report.entries.push(ReportEntry::Unused {
                count: allocation.unused,
            });
        }

        info!(
            "Sync completed: {} update(s), {} failure(s)",
            allocation.assignments.len(),
            report.failures()
        );
        report
    }

    /// List existing records for every hostname, in order
    ///
    /// Hostnames with no records, or whose lookup failed, are recorded in the
    /// report and left out of the result.
    async fn collect_records(&self, report: &mut RunReport) -> Vec<HostRecords> {
        let mut hosts = Vec::with_capacity(self.hostnames.len());

        for hostname in &self.hostnames {
            match self.provider.list_records(hostname).await {
                Ok(record_ids) if record_ids.is_empty() => {
                    info!("No DNS records found for {}, skipping", hostname);
                    report.entries.push(ReportEntry::Skipped {
                        hostname: hostname.clone(),
                        reason: SkipReason::NoRecords,
                    });
                }
                Ok(record_ids) => {
                    debug!("Found {} record(s) for {}", record_ids.len(), hostname);
                    hosts.push(HostRecords::new(hostname.clone(), record_ids));
                }
                Err(e) => {
                    warn!("Record lookup failed for {}, skipping: {}", hostname, e);
                    report.entries.push(ReportEntry::Skipped {
                        hostname: hostname.clone(),
                        reason: SkipReason::LookupFailed(e.to_string()),
                    });
                }
            }
        }

        hosts
    }
}
