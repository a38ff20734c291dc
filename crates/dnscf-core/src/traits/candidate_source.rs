// # Candidate Source Trait
//
// Defines the interface for fetching the list of candidate ("best") IP
// addresses published by a speed-test endpoint.
//
// ## Implementations
//
// - HTTP: `dnscf-source-http` crate
//
// ## Usage
//
// ```rust,ignore
// use dnscf_core::candidates::fetch_candidates;
//
// let source = /* CandidateSource implementation */;
// let candidates = fetch_candidates(&source, 5).await?;
// for ip in candidates.iter() {
//     println!("candidate: {ip}");
// }
// ```

use async_trait::async_trait;

/// Trait for candidate source implementations
///
/// A source performs exactly one fetch attempt per call and returns the raw
/// response body. Parsing and the bounded retry loop live in
/// [`fetch_candidates`](crate::candidates::fetch_candidates), so every source
/// gets the same attempt accounting.
///
/// ## Forbidden Capabilities
/// - ❌ Retry internally (the attempt budget is owned by the caller)
/// - ❌ Sleep between attempts
/// - ❌ Spawn tasks
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Perform one fetch attempt
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The raw, unparsed response body
    /// - `Err(Error)`: Transport failure, timeout or non-success status
    async fn fetch(&self) -> Result<String, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
