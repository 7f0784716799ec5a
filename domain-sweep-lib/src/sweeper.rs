//! Main sweep orchestration.
//!
//! This module provides [`DomainSweeper`], which wires the enumerator, the
//! bounded DNS scan, aggregation, and WHOIS enrichment into a single run.

use crate::aggregate::ScanAggregator;
use crate::checker::DomainClassifier;
use crate::concurrent::ConcurrentProcessor;
use crate::enrich::WhoisEnricher;
use crate::error::SweepError;
use crate::generate::{candidate_count, Candidates};
use crate::progress::SweepObserver;
use crate::protocols::{DnsClient, NsResolver, WhoisClient, WhoisLookup};
use crate::types::{CandidateDomain, RunConfig, RunContext, ScanSummary, SweepReport, WhoisRecord};
use crate::utils::{non_hostname_chars, repeated_chars};
use futures_util::StreamExt;
use std::sync::Arc;

/// Runs the full pipeline for one validated [`RunConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use domain_sweep_lib::{DomainSweeper, NoopObserver, RunConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RunConfig::default()
///         .with_alphabet("xq")
///         .with_lengths(3, 3)
///         .with_tlds([".com"])
///         .with_concurrency(50);
///
///     let sweeper = DomainSweeper::new(config)?;
///     let report = sweeper.run(&NoopObserver).await;
///     for domain in report.available_domains() {
///         println!("{}", domain);
///     }
///     Ok(())
/// }
/// ```
pub struct DomainSweeper {
    config: Arc<RunConfig>,
    total: usize,
    classifier: DomainClassifier,
    enricher: WhoisEnricher,
}

impl DomainSweeper {
    /// Validate `config` and build the real DNS and WHOIS backends.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::ConfigError` before any network activity if the
    /// configuration is invalid.
    pub fn new(config: RunConfig) -> Result<Self, SweepError> {
        let resolver = Arc::new(DnsClient::new(&config.nameservers, config.dns_timeout));
        let whois = Arc::new(WhoisClient::with_timeout(config.whois_timeout));
        Self::with_backends(config, resolver, whois)
    }

    /// Validate `config` and use the given backends.
    pub fn with_backends(
        config: RunConfig,
        resolver: Arc<dyn NsResolver>,
        whois: Arc<dyn WhoisLookup>,
    ) -> Result<Self, SweepError> {
        let total = candidate_count(&config)?;

        let repeated = repeated_chars(&config.alphabet);
        if !repeated.is_empty() {
            tracing::warn!(?repeated, "alphabet repeats characters, candidates will repeat too");
        }
        let invalid = non_hostname_chars(&config.alphabet);
        if !invalid.is_empty() {
            tracing::warn!(?invalid, "alphabet contains characters that are not valid in hostnames");
        }

        Ok(Self {
            config: Arc::new(config),
            total,
            classifier: DomainClassifier::new(resolver),
            enricher: WhoisEnricher::new(whois),
        })
    }

    /// Get the configuration for this sweeper.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of candidates a full scan probes.
    pub fn candidate_count(&self) -> usize {
        self.total
    }

    /// A fresh enumerator over this run's candidates.
    pub fn candidates(&self) -> Candidates {
        Candidates::start(&self.config, self.total)
    }

    /// Start a run context with the current time.
    pub fn start_context(&self) -> RunContext {
        RunContext::start(Arc::clone(&self.config))
    }

    /// Classify every candidate under the concurrency ceiling.
    pub async fn scan(&self, ctx: &RunContext, observer: &dyn SweepObserver) -> ScanSummary {
        let processor = ConcurrentProcessor::new(ctx.config.concurrency);
        tracing::info!(
            candidates = self.total,
            concurrency = processor.max_concurrency(),
            nameservers = ?ctx.config.nameservers,
            "starting DNS scan"
        );
        observer.scan_started(self.total);

        let mut aggregator = ScanAggregator::new(ctx.started_at);
        let mut outcomes = Box::pin(processor.probe_stream(self.candidates(), &self.classifier));
        while let Some(outcome) = outcomes.next().await {
            aggregator.record(outcome, observer);
        }

        let summary = aggregator.finish();
        tracing::info!(
            processed = summary.processed,
            available = summary.available_count(),
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "DNS scan finished"
        );
        observer.scan_finished(&summary);
        summary
    }

    /// Look up WHOIS for each available domain, one at a time.
    pub async fn enrich(
        &self,
        available: &[CandidateDomain],
        observer: &dyn SweepObserver,
    ) -> Vec<WhoisRecord> {
        tracing::info!(domains = available.len(), "starting WHOIS enrichment");
        let records = self.enricher.enrich(available, observer).await;
        let failed = records.iter().filter(|r| !r.succeeded).count();
        tracing::info!(lookups = records.len(), failed, "WHOIS enrichment finished");
        records
    }

    /// Scan, then enrich unless WHOIS is disabled.
    ///
    /// Always completes: per-domain DNS and WHOIS failures are folded into
    /// the report instead of aborting the run.
    pub async fn run(&self, observer: &dyn SweepObserver) -> SweepReport {
        let ctx = self.start_context();
        let scan = self.scan(&ctx, observer).await;

        let whois = if ctx.config.whois_enabled {
            self.enrich(&scan.available, observer).await
        } else {
            Vec::new()
        };

        SweepReport { scan, whois }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DnsAnswer, NegativeAnswer};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Names containing 'a' are free, everything else is taken.
    #[derive(Default)]
    struct LetterResolver {
        queries: AtomicUsize,
    }

    #[async_trait]
    impl NsResolver for LetterResolver {
        async fn query_ns(&self, domain: &str) -> DnsAnswer {
            self.queries.fetch_add(1, Ordering::SeqCst);
            let prefix = domain.split('.').next().unwrap_or_default();
            if prefix.contains('a') {
                DnsAnswer::Negative(NegativeAnswer::NoSuchDomain)
            } else {
                DnsAnswer::Positive
            }
        }
    }

    #[derive(Default)]
    struct CountingWhois {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl WhoisLookup for CountingWhois {
        async fn lookup(&self, domain: &str) -> Result<String, SweepError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(format!("No match for {}", domain))
        }
    }

    fn config() -> RunConfig {
        RunConfig::default()
            .with_alphabet("ab")
            .with_lengths(1, 2)
            .with_tlds([".com", ".net"])
            .with_concurrency(3)
    }

    #[test]
    fn test_invalid_config_rejected_before_queries() {
        let resolver = Arc::new(LetterResolver::default());
        let result = DomainSweeper::with_backends(
            config().with_lengths(2, 1),
            resolver.clone(),
            Arc::new(CountingWhois::default()),
        );
        assert!(matches!(result, Err(SweepError::ConfigError { .. })));
        assert_eq!(resolver.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_scans_every_candidate_and_enriches_available() {
        let resolver = Arc::new(LetterResolver::default());
        let whois = Arc::new(CountingWhois::default());
        let sweeper = DomainSweeper::with_backends(config(), resolver.clone(), whois.clone()).unwrap();

        assert_eq!(sweeper.candidate_count(), (2 + 4) * 2);
        let report = sweeper.run(&crate::NoopObserver).await;

        // a, aa, ab, ba on both TLDs
        assert_eq!(report.scan.processed, 12);
        assert_eq!(resolver.queries.load(Ordering::SeqCst), 12);
        assert_eq!(report.scan.available_count(), 8);
        assert_eq!(whois.lookups.load(Ordering::SeqCst), 8);

        let enriched: Vec<_> = report.whois.iter().map(|r| r.domain.clone()).collect();
        assert_eq!(enriched, report.scan.available);
    }

    #[tokio::test]
    async fn test_whois_can_be_disabled() {
        let whois = Arc::new(CountingWhois::default());
        let sweeper = DomainSweeper::with_backends(
            config().with_whois(false),
            Arc::new(LetterResolver::default()),
            whois.clone(),
        )
        .unwrap();

        let report = sweeper.run(&crate::NoopObserver).await;

        assert_eq!(report.scan.available_count(), 8);
        assert!(report.whois.is_empty());
        assert_eq!(whois.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_candidates_restart_from_the_beginning() {
        let sweeper = DomainSweeper::with_backends(
            config(),
            Arc::new(LetterResolver::default()),
            Arc::new(CountingWhois::default()),
        )
        .unwrap();

        let first: Vec<_> = sweeper.candidates().take(3).collect();
        let again: Vec<_> = sweeper.candidates().take(3).collect();
        assert_eq!(first, again);
        assert_eq!(first[0].as_str(), "a.com");
    }
}
