//! IP-to-record allocation
//!
//! Each hostname receives as many consecutive candidates as it has existing
//! records, in hostname order. The whole batch is refused when the candidate
//! list cannot cover every record, so a run never leaves some records fresh
//! and others stale.
//!
//! ```text
//! candidates: [1.1.1.1, 2.2.2.2, 3.3.3.3, 4.4.4.4]
//! a.example.com (2 records) ── 1.1.1.1, 2.2.2.2
//! b.example.com (1 record)  ── 3.3.3.3
//! unused                    ── 4.4.4.4
//! ```

use crate::candidates::CandidateList;
use crate::error::{Error, Result};
use std::net::IpAddr;

/// Existing records of one hostname, as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecords {
    /// The hostname
    pub hostname: String,
    /// Record identifiers in provider order
    pub record_ids: Vec<String>,
}

impl HostRecords {
    /// Create a new host record set
    pub fn new(hostname: impl Into<String>, record_ids: Vec<String>) -> Self {
        Self {
            hostname: hostname.into(),
            record_ids,
        }
    }
}

/// One planned record overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Provider record identifier
    pub record_id: String,
    /// Hostname the record belongs to
    pub hostname: String,
    /// Candidate IP assigned to the record
    pub ip: IpAddr,
}

/// The full plan for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Assignments in hostname order, then record order
    pub assignments: Vec<Assignment>,
    /// Candidates left over after every record was served
    pub unused: usize,
}

/// Total number of record slots across all hostnames
pub fn required_slots(hosts: &[HostRecords]) -> usize {
    hosts.iter().map(|host| host.record_ids.len()).sum()
}

/// Assign candidates to records
///
/// Hostnames without records are skipped and consume nothing.
///
/// # Returns
///
/// - `Ok(Allocation)`: Every record paired with a distinct candidate
/// - `Err(Error::InsufficientCandidates)`: Fewer candidates than records
pub fn allocate(hosts: &[HostRecords], candidates: &CandidateList) -> Result<Allocation> {
    let required = required_slots(hosts);
    let available = candidates.len();

    if available < required {
        return Err(Error::InsufficientCandidates {
            required,
            available,
        });
    }

    let ips = candidates.as_slice();
    let mut cursor = 0;
    let mut assignments = Vec::with_capacity(required);

    for host in hosts.iter().filter(|host| !host.record_ids.is_empty()) {
        let slice = &ips[cursor..cursor + host.record_ids.len()];
        cursor += host.record_ids.len();

        assignments.extend(host.record_ids.iter().zip(slice).map(|(record_id, ip)| {
            Assignment {
                record_id: record_id.clone(),
                hostname: host.hostname.clone(),
                ip: *ip,
            }
        }));
    }

    Ok(Allocation {
        assignments,
        unused: available - cursor,
    })
}
