//! Candidate classification.
//!
//! This module turns one candidate into one [`ProbeOutcome`] by asking the
//! shared resolver for NS records and applying the fail-closed rule.

use crate::protocols::NsResolver;
use crate::types::{CandidateDomain, DnsAnswer, ProbeOutcome};
use std::sync::Arc;

/// Classifies candidates with a single NS query each.
///
/// # Example
///
/// ```rust,no_run
/// use domain_sweep_lib::{CandidateDomain, DnsClient, DomainClassifier, DEFAULT_NAMESERVER};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let resolver = Arc::new(DnsClient::new(&[DEFAULT_NAMESERVER], None));
///     let classifier = DomainClassifier::new(resolver);
///     let outcome = classifier.classify(CandidateDomain::from("example.com")).await;
///     println!("{}: available={}", outcome.domain, outcome.available);
/// }
/// ```
#[derive(Clone)]
pub struct DomainClassifier {
    /// Shared by every in-flight probe
    resolver: Arc<dyn NsResolver>,
}

impl DomainClassifier {
    pub fn new(resolver: Arc<dyn NsResolver>) -> Self {
        Self { resolver }
    }

    /// Probe one candidate.
    ///
    /// Never fails: resolver errors come back as `DnsAnswer::Failure` and
    /// classify as registered. No retries.
    pub async fn classify(&self, domain: CandidateDomain) -> ProbeOutcome {
        let answer = self.resolver.query_ns(domain.as_str()).await;

        if let DnsAnswer::Failure(reason) = &answer {
            tracing::debug!(domain = %domain, %reason, "NS query failed, treating as registered");
        }

        ProbeOutcome::new(domain, answer)
    }
}
