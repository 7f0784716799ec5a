//! Bounded-concurrency probe scheduling.
//!
//! This module multiplexes classifier futures under a fixed ceiling and hands
//! outcomes back in completion order.

use crate::checker::DomainClassifier;
use crate::types::{CandidateDomain, ProbeOutcome};
use futures_util::stream::{self, Stream, StreamExt};

/// Runs classifications with at most `max_concurrency` queries in flight.
///
/// Candidates are pulled from the iterator only when a slot frees up, so the
/// full candidate set is never materialized.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentProcessor {
    max_concurrency: usize,
}

impl ConcurrentProcessor {
    /// Create a new processor; a ceiling of 0 is raised to 1.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Classify every candidate, yielding outcomes as they complete.
    ///
    /// Each candidate is classified exactly once and yields exactly one
    /// outcome. Completion order is unspecified.
    pub fn probe_stream<'a, I>(
        &self,
        candidates: I,
        classifier: &'a DomainClassifier,
    ) -> impl Stream<Item = ProbeOutcome> + 'a
    where
        I: IntoIterator<Item = CandidateDomain>,
        I::IntoIter: 'a,
    {
        stream::iter(candidates)
            .map(move |domain| classifier.classify(domain))
            .buffer_unordered(self.max_concurrency)
    }
}
