//! Core data types for the sweep pipeline.
//!
//! This module defines the values that flow between stages (candidates,
//! probe outcomes, WHOIS records, summaries) and the run configuration shared
//! read-only by all of them.

use crate::error::SweepError;
use crate::utils::normalize_tld;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default minimum prefix length.
pub const DEFAULT_MIN_LEN: usize = 3;

/// Default maximum prefix length.
pub const DEFAULT_MAX_LEN: usize = 3;

/// Default ceiling on concurrent DNS queries.
pub const DEFAULT_CONCURRENCY: usize = 500;

/// Default output artifact path.
pub const DEFAULT_OUTPUT_PATH: &str = "available.txt";

/// Default upstream resolver (Cloudflare).
pub const DEFAULT_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53);

/// A fully qualified candidate name: alphabet prefix followed by a TLD.
///
/// Produced once by the enumerator and moved, never mutated, through the
/// rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateDomain(String);

impl CandidateDomain {
    /// Join a prefix and an already-normalized TLD (e.g. `".com"`).
    pub fn new(prefix: &str, tld: &str) -> Self {
        let mut name = String::with_capacity(prefix.len() + tld.len());
        name.push_str(prefix);
        name.push_str(tld);
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidateDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CandidateDomain {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for CandidateDomain {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// The two negative-answer classes that mean "nothing is registered here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeAnswer {
    /// NXDOMAIN: the name does not exist
    #[serde(rename = "no_such_domain")]
    NoSuchDomain,

    /// NOERROR with an empty answer section (NODATA)
    #[serde(rename = "no_records")]
    NoRecords,
}

/// What the resolver said about one NS query.
///
/// Kept three-way so the cause stays inspectable; [`DnsAnswer::indicates_available`]
/// collapses it to the boolean at the pipeline boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DnsAnswer {
    /// The query returned records
    Positive,

    /// The upstream answered authoritatively that there is nothing there
    Negative(NegativeAnswer),

    /// Timeout, SERVFAIL, REFUSED, malformed reply, network error...
    Failure(String),
}

impl DnsAnswer {
    /// Fail-closed mapping: only a negative answer means available.
    pub fn indicates_available(&self) -> bool {
        matches!(self, Self::Negative(_))
    }
}

impl fmt::Display for DnsAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "NS records found"),
            Self::Negative(NegativeAnswer::NoSuchDomain) => write!(f, "NXDOMAIN"),
            Self::Negative(NegativeAnswer::NoRecords) => write!(f, "no records"),
            Self::Failure(reason) => write!(f, "lookup failed: {}", reason),
        }
    }
}

/// Result of classifying one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub domain: CandidateDomain,

    /// Derived from `answer` when the outcome is built
    pub available: bool,

    pub answer: DnsAnswer,
}

impl ProbeOutcome {
    pub fn new(domain: CandidateDomain, answer: DnsAnswer) -> Self {
        Self {
            available: answer.indicates_available(),
            domain,
            answer,
        }
    }
}

/// WHOIS detail for one available domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    pub domain: CandidateDomain,

    /// Raw registry text, or the error description when the lookup failed
    pub detail: String,

    /// Whether `detail` holds registry text
    pub succeeded: bool,
}

/// Totals collected once the scan stream is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of outcomes seen (equals the candidate count)
    pub processed: usize,

    /// Available domains in completion order
    pub available: Vec<CandidateDomain>,

    /// Wall-clock time from run start to the last outcome
    pub elapsed: Duration,
}

impl ScanSummary {
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn registered_count(&self) -> usize {
        self.processed - self.available.len()
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub scan: ScanSummary,

    /// One record per available domain, empty when WHOIS is disabled
    pub whois: Vec<WhoisRecord>,
}

impl SweepReport {
    /// Domain names to persist, in completion order.
    pub fn available_domains(&self) -> &[CandidateDomain] {
        &self.scan.available
    }
}

/// Immutable settings for one run.
///
/// Built once from external input, validated, then shared through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Characters to build prefixes from, in enumeration order
    pub alphabet: Vec<char>,

    /// Shortest prefix length (>= 1)
    pub min_len: usize,

    /// Longest prefix length (>= min_len)
    pub max_len: usize,

    /// TLD suffixes, each starting with a dot
    pub tlds: Vec<String>,

    /// Ceiling on concurrent DNS queries
    pub concurrency: usize,

    /// Upstream resolvers, tried in order
    pub nameservers: Vec<SocketAddr>,

    /// Where the available domains are written
    pub output_path: PathBuf,

    /// Per-query DNS timeout; `None` keeps the resolver default
    pub dns_timeout: Option<Duration>,

    /// Per-lookup WHOIS timeout; `None` waits for the command to exit
    pub whois_timeout: Option<Duration>,

    /// Whether available domains are enriched with WHOIS
    pub whois_enabled: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            alphabet: Vec::new(),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            tlds: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            nameservers: vec![DEFAULT_NAMESERVER],
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            dns_timeout: None,
            whois_timeout: None,
            whois_enabled: true,
        }
    }
}

impl RunConfig {
    /// Use every character of `chars`, in order, as the alphabet.
    pub fn with_alphabet(mut self, chars: &str) -> Self {
        self.alphabet = chars.chars().collect();
        self
    }

    pub fn with_lengths(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }

    /// Set TLDs, adding a leading dot where missing.
    pub fn with_tlds<I, S>(mut self, tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tlds = tlds.into_iter().map(|t| normalize_tld(t.as_ref())).collect();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set upstream resolvers; an empty list keeps the default.
    pub fn with_nameservers(mut self, nameservers: Vec<SocketAddr>) -> Self {
        if !nameservers.is_empty() {
            self.nameservers = nameservers;
        }
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_dns_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.dns_timeout = timeout;
        self
    }

    pub fn with_whois_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.whois_timeout = timeout;
        self
    }

    pub fn with_whois(mut self, enabled: bool) -> Self {
        self.whois_enabled = enabled;
        self
    }

    /// Check the configuration before any work starts.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::ConfigError` for an empty alphabet, an empty or
    /// malformed TLD list, a zero or inverted length range, a zero
    /// concurrency ceiling, or an empty nameserver list.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.alphabet.is_empty() {
            return Err(SweepError::config("Alphabet cannot be empty"));
        }

        if self.min_len == 0 {
            return Err(SweepError::config("min_len must be at least 1"));
        }

        if self.min_len > self.max_len {
            return Err(SweepError::config(format!(
                "min_len ({}) is greater than max_len ({})",
                self.min_len, self.max_len
            )));
        }

        if self.tlds.is_empty() {
            return Err(SweepError::config("At least one TLD is required"));
        }

        for tld in &self.tlds {
            if tld.len() < 2 || !tld.starts_with('.') || tld.chars().any(char::is_whitespace) {
                return Err(SweepError::config(format!("Invalid TLD '{}'", tld)));
            }
        }

        if self.concurrency == 0 {
            return Err(SweepError::config("Concurrency must be at least 1"));
        }

        if self.nameservers.is_empty() {
            return Err(SweepError::config("At least one nameserver is required"));
        }

        Ok(())
    }
}

/// Per-run context: the shared config plus the instant the run began.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Arc<RunConfig>,
    pub started_at: Instant,
}

impl RunContext {
    /// Capture the start time now.
    pub fn start(config: Arc<RunConfig>) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RunConfig {
        RunConfig::default()
            .with_alphabet("ab")
            .with_lengths(1, 2)
            .with_tlds([".com"])
    }

    #[test]
    fn test_defaults_match_cli_surface() {
        let config = RunConfig::default();
        assert_eq!(config.min_len, 3);
        assert_eq!(config.max_len, 3);
        assert_eq!(config.concurrency, 500);
        assert_eq!(config.output_path, PathBuf::from("available.txt"));
        assert_eq!(config.nameservers, vec![DEFAULT_NAMESERVER]);
        assert!(config.whois_enabled);
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_lengths() {
        let err = valid_config().with_lengths(3, 2).validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        assert!(valid_config().with_alphabet("").validate().is_err());
        assert!(valid_config()
            .with_tlds(Vec::<String>::new())
            .validate()
            .is_err());
        assert!(valid_config().with_lengths(0, 2).validate().is_err());
        assert!(valid_config().with_concurrency(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_tld() {
        let err = valid_config().with_tlds(["  "]).validate().unwrap_err();
        assert!(err.to_string().contains("Invalid TLD"));
    }

    #[test]
    fn test_with_tlds_adds_missing_dot() {
        let config = valid_config().with_tlds(["com", ".net"]);
        assert_eq!(config.tlds, vec![".com".to_string(), ".net".to_string()]);
    }

    #[test]
    fn test_empty_nameserver_list_keeps_default() {
        let config = valid_config().with_nameservers(Vec::new());
        assert_eq!(config.nameservers, vec![DEFAULT_NAMESERVER]);
    }

    #[test]
    fn test_fail_closed_mapping() {
        assert!(DnsAnswer::Negative(NegativeAnswer::NoSuchDomain).indicates_available());
        assert!(DnsAnswer::Negative(NegativeAnswer::NoRecords).indicates_available());
        assert!(!DnsAnswer::Positive.indicates_available());
        assert!(!DnsAnswer::Failure("SERVFAIL".to_string()).indicates_available());
    }

    #[test]
    fn test_probe_outcome_derives_availability() {
        let outcome = ProbeOutcome::new(
            CandidateDomain::from("a.com"),
            DnsAnswer::Failure("timed out".to_string()),
        );
        assert!(!outcome.available);

        let outcome = ProbeOutcome::new(
            CandidateDomain::from("b.com"),
            DnsAnswer::Negative(NegativeAnswer::NoSuchDomain),
        );
        assert!(outcome.available);
    }

    #[test]
    fn test_candidate_domain_joins_prefix_and_tld() {
        let domain = CandidateDomain::new("ab", ".im");
        assert_eq!(domain.as_str(), "ab.im");
        assert_eq!(domain.to_string(), "ab.im");
    }

    #[test]
    fn test_summary_counts() {
        let summary = ScanSummary {
            processed: 5,
            available: vec![CandidateDomain::from("a.com"), CandidateDomain::from("b.com")],
            elapsed: Duration::from_millis(10),
        };
        assert_eq!(summary.available_count(), 2);
        assert_eq!(summary.registered_count(), 3);
    }
}
