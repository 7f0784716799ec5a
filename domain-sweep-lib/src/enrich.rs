//! WHOIS enrichment of available domains.
//!
//! Lookups run strictly one at a time, after the DNS scan has drained, so they
//! never compete with the DNS concurrency ceiling.

use crate::progress::SweepObserver;
use crate::protocols::WhoisLookup;
use crate::types::{CandidateDomain, WhoisRecord};
use std::sync::Arc;

/// Serial WHOIS stage.
#[derive(Clone)]
pub struct WhoisEnricher {
    whois: Arc<dyn WhoisLookup>,
}

impl WhoisEnricher {
    pub fn new(whois: Arc<dyn WhoisLookup>) -> Self {
        Self { whois }
    }

    /// Look up each domain in order and record the result.
    ///
    /// A failed lookup becomes a record whose detail is the error text; the
    /// remaining domains are still processed.
    pub async fn enrich(
        &self,
        domains: &[CandidateDomain],
        observer: &dyn SweepObserver,
    ) -> Vec<WhoisRecord> {
        observer.whois_started(domains.len());

        let mut records = Vec::with_capacity(domains.len());
        for domain in domains {
            let record = match self.whois.lookup(domain.as_str()).await {
                Ok(text) => WhoisRecord {
                    domain: domain.clone(),
                    detail: text,
                    succeeded: true,
                },
                Err(e) => {
                    tracing::debug!(domain = %domain, error = %e, "WHOIS lookup failed");
                    WhoisRecord {
                        domain: domain.clone(),
                        detail: e.to_string(),
                        succeeded: false,
                    }
                }
            };
            observer.whois_completed(&record);
            records.push(record);
        }

        observer.whois_finished();
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails for names starting with "bad", and tracks overlap.
    #[derive(Default)]
    struct ScriptedWhois {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl WhoisLookup for ScriptedWhois {
        async fn lookup(&self, domain: &str) -> Result<String, SweepError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if domain.starts_with("bad") {
                Err(SweepError::whois(domain, "connection reset"))
            } else {
                Ok(format!("Domain Name: {}\nNo match", domain.to_uppercase()))
            }
        }
    }

    #[derive(Default)]
    struct Events(RefCell<Vec<String>>);

    impl SweepObserver for Events {
        fn whois_started(&self, total: usize) {
            self.0.borrow_mut().push(format!("start {}", total));
        }
        fn whois_completed(&self, record: &WhoisRecord) {
            self.0.borrow_mut().push(format!("done {}", record.domain));
        }
        fn whois_finished(&self) {
            self.0.borrow_mut().push("finish".to_string());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_become_detail_and_do_not_abort() {
        let whois = Arc::new(ScriptedWhois::default());
        let enricher = WhoisEnricher::new(whois.clone());
        let domains: Vec<CandidateDomain> = vec!["ok1.com".into(), "bad.com".into(), "ok2.com".into()];

        let records = enricher.enrich(&domains, &crate::NoopObserver).await;

        assert_eq!(records.len(), 3);
        assert!(records[0].succeeded);
        assert!(records[0].detail.contains("OK1.COM"));
        assert!(!records[1].succeeded);
        assert_eq!(records[1].detail, "WHOIS error for 'bad.com': connection reset");
        assert!(records[2].succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_strictly_serial_in_list_order() {
        let whois = Arc::new(ScriptedWhois::default());
        let enricher = WhoisEnricher::new(whois.clone());
        let domains: Vec<CandidateDomain> = vec!["z.com".into(), "a.com".into(), "m.com".into()];
        let events = Events::default();

        let records = enricher.enrich(&domains, &events).await;

        assert_eq!(whois.peak.load(Ordering::SeqCst), 1);
        let order: Vec<_> = records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(order, ["z.com", "a.com", "m.com"]);
        assert_eq!(
            *events.0.borrow(),
            ["start 3", "done z.com", "done a.com", "done m.com", "finish"]
        );
    }

    #[tokio::test]
    async fn test_empty_list_still_reports() {
        let enricher = WhoisEnricher::new(Arc::new(ScriptedWhois::default()));
        let events = Events::default();
        let records = enricher.enrich(&[], &events).await;
        assert!(records.is_empty());
        assert_eq!(*events.0.borrow(), ["start 0", "finish"]);
    }
}
