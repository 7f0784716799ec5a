//! Network backends used by the pipeline.
//!
//! Each backend sits behind a trait so the pipeline can be driven by mocks.

/// NS-record probing over DNS
pub mod dns;

/// WHOIS enrichment via the system `whois` command
pub mod whois;

pub use dns::{DnsClient, NsResolver};
pub use whois::{is_whois_available, WhoisClient, WhoisLookup};
