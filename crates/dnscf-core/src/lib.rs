// # dnscf-core
//
// Core library for the best-IP to Cloudflare DNS synchronizer.
//
// ## Architecture Overview
//
// This library provides the core functionality for one synchronization run:
// - **CandidateSource**: Trait for fetching the published candidate IP list
// - **DnsProvider**: Trait for listing and overwriting DNS address records
// - **allocate**: Pure assignment of candidates to existing records
// - **SyncEngine**: Orchestrates fetch → list → allocate → update
// - **RunReport**: Ordered summary of everything a run did
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from HTTP implementations
// 2. **All-or-Nothing Allocation**: No record is touched unless every record can be served
// 3. **Failures Are Values**: Remote failures become report entries, not panics
// 4. **Library-First**: The binary is a thin wrapper over this crate

pub mod allocation;
pub mod candidates;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod traits;

// Re-export core types for convenience
pub use allocation::{Allocation, Assignment, HostRecords, allocate};
pub use candidates::{CandidateList, fetch_candidates};
pub use config::{RunMode, SyncConfig};
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use report::{ReportEntry, RunOutcome, RunReport, SkipReason, UpdateOutcome};
pub use traits::{CandidateSource, DnsProvider, UpdateStatus};
