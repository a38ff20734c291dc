//! Run report
//!
//! A [`RunReport`] collects everything a run did in order: skipped hostnames,
//! one [`UpdateOutcome`] per attempted record, and leftover candidates. It is
//! printed once at the end of the run and then discarded.

use crate::traits::UpdateStatus;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every candidate fetch attempt failed, or the list was empty
    NoCandidates {
        /// Why no candidates were available
        reason: String,
    },
    /// Fewer candidates than record slots; nothing was updated
    InsufficientCandidates {
        /// Total record slots across all hostnames
        required: usize,
        /// Candidates returned by the source
        available: usize,
    },
    /// Updates were attempted (individual updates may still have failed)
    Completed,
}

/// Why a hostname received no candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The zone holds no record with this exact name
    NoRecords,
    /// Listing the zone's records failed
    LookupFailed(String),
}

/// Result of one attempted record update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Provider record identifier
    pub record_id: String,
    /// Hostname the record belongs to
    pub hostname: String,
    /// What happened
    pub status: UpdateStatus,
    /// When the update finished
    pub at: DateTime<Utc>,
}

impl UpdateOutcome {
    /// Create an outcome stamped with the current time
    pub fn now(
        record_id: impl Into<String>,
        hostname: impl Into<String>,
        status: UpdateStatus,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            hostname: hostname.into(),
            status,
            at: Utc::now(),
        }
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.status.is_success() {
            "SUCCESS"
        } else {
            "ERROR"
        };
        write!(
            f,
            "[{}] {}: {} - {}",
            tag,
            self.hostname,
            self.status,
            self.at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// One line of the run summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    /// A hostname was skipped
    Skipped {
        /// The hostname
        hostname: String,
        /// Why it was skipped
        reason: SkipReason,
    },
    /// A record update was attempted
    Update(UpdateOutcome),
    /// Candidates were left over after every record was served
    Unused {
        /// Number of unused candidates
        count: usize,
    },
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::Skipped {
                hostname,
                reason: SkipReason::NoRecords,
            } => write!(f, "[SKIPPED] {hostname}: no DNS records found"),
            ReportEntry::Skipped {
                hostname,
                reason: SkipReason::LookupFailed(detail),
            } => write!(f, "[SKIPPED] {hostname}: record lookup failed: {detail}"),
            ReportEntry::Update(outcome) => write!(f, "{outcome}"),
            ReportEntry::Unused { count } => {
                write!(f, "[INFO] {count} candidate IP(s) left unused")
            }
        }
    }
}

/// Everything a run did, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Terminal state
    pub outcome: RunOutcome,
    /// Ordered summary entries
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    /// A report with no entries
    pub fn new(outcome: RunOutcome) -> Self {
        Self {
            outcome,
            entries: Vec::new(),
        }
    }

    /// Iterate over the update outcomes only
    pub fn updates(&self) -> impl Iterator<Item = &UpdateOutcome> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Update(outcome) => Some(outcome),
            _ => None,
        })
    }

    /// Number of failed updates
    pub fn failures(&self) -> usize {
        self.updates().filter(|u| !u.status.is_success()).count()
    }

    /// Render the summary: one line for the terminal state, then one per entry
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(match &self.outcome {
            RunOutcome::NoCandidates { reason } => {
                format!("No candidate IPs available: {reason}")
            }
            RunOutcome::InsufficientCandidates {
                required,
                available,
            } => format!(
                "Insufficient candidate IPs: {available} available, {required} required; no records updated"
            ),
            RunOutcome::Completed => {
                let total = self.updates().count();
                format!(
                    "Completed: {} of {} record update(s) succeeded",
                    total - self.failures(),
                    total
                )
            }
        });
        lines.extend(self.entries.iter().map(ToString::to_string));
        lines.join("\n")
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn failed_update_line_names_hostname_and_status() {
        let outcome = UpdateOutcome::now(
            "r1",
            "a.example.com",
            UpdateStatus::HttpError { status: 403 },
        );
        let line = outcome.to_string();
        assert!(line.starts_with("[ERROR] a.example.com: "));
        assert!(line.contains("403"));
    }

    #[test]
    fn completed_summary_counts_failures() {
        let ip = IpAddr::from([1, 1, 1, 1]);
        let mut report = RunReport::new(RunOutcome::Completed);
        report.entries.push(ReportEntry::Update(UpdateOutcome::now(
            "r1",
            "a.example.com",
            UpdateStatus::Updated { ip },
        )));
        report.entries.push(ReportEntry::Update(UpdateOutcome::now(
            "r2",
            "a.example.com",
            UpdateStatus::TransportError {
                detail: "connection reset".to_string(),
            },
        )));
        report.entries.push(ReportEntry::Unused { count: 2 });

        let rendered = report.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Completed: 1 of 2 record update(s) succeeded");
        assert!(lines[1].starts_with("[SUCCESS] a.example.com: updated to 1.1.1.1"));
        assert!(lines[2].contains("connection reset"));
        assert_eq!(lines[3], "[INFO] 2 candidate IP(s) left unused");
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn skipped_lines_distinguish_causes() {
        let none = ReportEntry::Skipped {
            hostname: "x.example.com".to_string(),
            reason: SkipReason::NoRecords,
        };
        let failed = ReportEntry::Skipped {
            hostname: "x.example.com".to_string(),
            reason: SkipReason::LookupFailed("status 403".to_string()),
        };
        assert!(none.to_string().contains("no DNS records found"));
        assert!(failed.to_string().contains("record lookup failed: status 403"));
    }

    #[test]
    fn insufficient_summary() {
        let report = RunReport::new(RunOutcome::InsufficientCandidates {
            required: 3,
            available: 2,
        });
        assert_eq!(
            report.render(),
            "Insufficient candidate IPs: 2 available, 3 required; no records updated"
        );
    }
}
