//! # Domain Sweep Library
//!
//! Exhaustive availability sweeps over a fixed-length name space.
//!
//! Every string over an alphabet within a length range is paired with every
//! TLD and probed with a DNS NS query under a bounded concurrency ceiling.
//! Names with a definitive negative answer are reported as available, then
//! enriched one at a time with WHOIS.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_sweep_lib::{write_available, DomainSweeper, NoopObserver, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::default()
//!         .with_alphabet("abc")
//!         .with_lengths(3, 3)
//!         .with_tlds([".im", ".io"])
//!         .with_concurrency(200);
//!
//!     let sweeper = DomainSweeper::new(config)?;
//!     let report = sweeper.run(&NoopObserver).await;
//!     write_available(&sweeper.config().output_path, report.available_domains())?;
//!
//!     println!("{} available", report.scan.available_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Enumerator**: lazy, restartable, shortest-first candidate stream
//! - **Scan**: NS queries with at most `concurrency` in flight
//! - **Aggregation**: available list plus progress ticks per outcome
//! - **Enrichment**: serial WHOIS lookups for available names
//! - **Output**: one available domain per line

// Re-export main public API types and functions
pub use aggregate::ScanAggregator;
pub use checker::DomainClassifier;
pub use concurrent::ConcurrentProcessor;
pub use config::{ConfigManager, DefaultsConfig, FileConfig};
pub use enrich::WhoisEnricher;
pub use error::SweepError;
pub use generate::{candidate_count, enumerate_candidates, Candidates};
pub use output::write_available;
pub use progress::{NoopObserver, SweepObserver};
pub use protocols::{is_whois_available, DnsClient, NsResolver, WhoisClient, WhoisLookup};
pub use sweeper::DomainSweeper;
pub use types::{
    CandidateDomain, DnsAnswer, NegativeAnswer, ProbeOutcome, RunConfig, RunContext, ScanSummary,
    SweepReport, WhoisRecord, DEFAULT_CONCURRENCY, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN,
    DEFAULT_NAMESERVER, DEFAULT_OUTPUT_PATH,
};
pub use utils::{normalize_tld, parse_duration, parse_nameserver, parse_nameservers};

// Internal modules - these are not part of the public API
mod aggregate;
mod checker;
mod concurrent;
mod config;
mod enrich;
mod error;
mod generate;
mod output;
mod progress;
mod protocols;
mod sweeper;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SweepError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
