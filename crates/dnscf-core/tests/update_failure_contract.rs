//! Contract Test: Per-Record Update Failures
//!
//! Constraints verified:
//! - A failed update is recorded as a failure outcome and never aborts the run
//! - The failure outcome names the hostname and the status code
//! - Updates are not retried

mod common;

use common::*;
use dnscf_core::{RunOutcome, SyncEngine, UpdateStatus};

#[tokio::test]
async fn failed_update_does_not_stop_the_batch() {
    let source = ScriptedSource::succeeding("1.1.1.1,2.2.2.2,3.3.3.3");
    let provider = RecordingProvider::new()
        .with_records("a.example.com", &["a-1", "a-2"])
        .with_records("b.example.com", &["b-1"])
        .with_failed_update("a-1", UpdateStatus::HttpError { status: 500 });
    let calls = provider.calls();

    let engine = SyncEngine::new(
        Box::new(source),
        Box::new(provider),
        &minimal_config("a.example.com,b.example.com"),
    )
    .expect("engine construction succeeds");

    let report = engine.run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(calls.lock().unwrap().updates.len(), 3, "each record updated exactly once");
    assert_eq!(report.failures(), 1);

    let failed = report
        .updates()
        .find(|u| !u.status.is_success())
        .expect("one failure outcome");
    let line = failed.to_string();
    assert!(line.contains("a.example.com"));
    assert!(line.contains("500"));
}

#[tokio::test]
async fn transport_failure_is_reported_with_detail() {
    let source = ScriptedSource::succeeding("1.1.1.1");
    let provider = RecordingProvider::new()
        .with_records("a.example.com", &["a-1"])
        .with_failed_update(
            "a-1",
            UpdateStatus::TransportError {
                detail: "operation timed out".to_string(),
            },
        );

    let engine = SyncEngine::new(
        Box::new(source),
        Box::new(provider),
        &minimal_config("a.example.com"),
    )
    .expect("engine construction succeeds");

    let report = engine.run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    let rendered = report.render();
    assert!(rendered.starts_with("Completed: 0 of 1 record update(s) succeeded"));
    assert!(rendered.contains("[ERROR] a.example.com: update failed: operation timed out"));
}
