//! Core traits for the dnscf synchronizer
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`CandidateSource`]: Fetch the published list of candidate IPs
//! - [`DnsProvider`]: List and overwrite address records via provider APIs

pub mod candidate_source;
pub mod dns_provider;

pub use candidate_source::CandidateSource;
pub use dns_provider::{DnsProvider, UpdateStatus};
