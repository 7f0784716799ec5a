//! Progress events emitted by the pipeline.
//!
//! The library never draws anything itself. Front ends implement
//! [`SweepObserver`] to render progress bars, logs, or nothing at all.

use crate::types::{ProbeOutcome, ScanSummary, WhoisRecord};

/// Receives one call per pipeline event. Every hook defaults to a no-op.
///
/// Hooks run inline on the pipeline task and must return quickly.
pub trait SweepObserver {
    /// The DNS scan is about to probe `total` candidates.
    fn scan_started(&self, _total: usize) {}

    /// One candidate finished classification (available or not).
    fn probe_completed(&self, _outcome: &ProbeOutcome) {}

    /// Every candidate has been classified.
    fn scan_finished(&self, _summary: &ScanSummary) {}

    /// WHOIS enrichment is about to look up `total` domains.
    fn whois_started(&self, _total: usize) {}

    /// One WHOIS lookup finished, successfully or not.
    fn whois_completed(&self, _record: &WhoisRecord) {}

    /// Every available domain has a WHOIS record.
    fn whois_finished(&self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}
