//! Scan result aggregation.

use crate::progress::SweepObserver;
use crate::types::{CandidateDomain, ProbeOutcome, ScanSummary};
use std::time::Instant;

/// Folds probe outcomes into the available list and running totals.
///
/// O(1) per outcome and no I/O, so it never holds up the scheduler.
#[derive(Debug)]
pub struct ScanAggregator {
    started_at: Instant,
    processed: usize,
    available: Vec<CandidateDomain>,
}

impl ScanAggregator {
    /// `started_at` is the run's start, used for the elapsed time.
    pub fn new(started_at: Instant) -> Self {
        Self {
            started_at,
            processed: 0,
            available: Vec::new(),
        }
    }

    /// Record one outcome and tick progress, regardless of availability.
    pub fn record(&mut self, outcome: ProbeOutcome, observer: &dyn SweepObserver) {
        self.processed += 1;
        observer.probe_completed(&outcome);
        if outcome.available {
            self.available.push(outcome.domain);
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Close the scan and hand the available list on.
    pub fn finish(self) -> ScanSummary {
        ScanSummary {
            processed: self.processed,
            available: self.available,
            elapsed: self.started_at.elapsed(),
        }
    }
}
