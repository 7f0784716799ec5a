//! DNS NS-record probing.
//!
//! This module wraps `trust-dns-resolver` behind the [`NsResolver`] trait and
//! folds every resolver outcome into a [`DnsAnswer`], so a probe never fails
//! from the caller's point of view.

use crate::types::{DnsAnswer, NegativeAnswer};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

/// Something that can answer "does this name have NS records?".
///
/// Implementations must tolerate many concurrent calls on one shared handle.
#[async_trait]
pub trait NsResolver: Send + Sync {
    /// Issue exactly one NS query for `domain` and report what came back.
    async fn query_ns(&self, domain: &str) -> DnsAnswer;
}

/// NS resolver backed by a Tokio `trust-dns` resolver.
///
/// The inner resolver is internally synchronized and cheap to clone, so one
/// `DnsClient` is shared by every in-flight probe.
#[derive(Clone)]
pub struct DnsClient {
    resolver: TokioAsyncResolver,
}

impl DnsClient {
    /// Build a resolver that talks only to `nameservers`, in order.
    ///
    /// No system configuration or search domains are used. Negative answers
    /// from an upstream are trusted rather than retried on the next server.
    pub fn new(nameservers: &[SocketAddr], timeout: Option<Duration>) -> Self {
        let mut group = NameServerConfigGroup::new();
        for addr in nameservers {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[addr.ip()],
                addr.port(),
                true,
            ));
        }

        let config = ResolverConfig::from_parts(None, Vec::new(), group);

        let mut opts = ResolverOpts::default();
        if let Some(timeout) = timeout {
            opts.timeout = timeout;
        }

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl NsResolver for DnsClient {
    async fn query_ns(&self, domain: &str) -> DnsAnswer {
        let name = to_fqdn(domain);
        match self.resolver.lookup(name.as_str(), RecordType::NS).await {
            Ok(_) => DnsAnswer::Positive,
            Err(err) => classify_error(&err),
        }
    }
}

/// Append the root label so the name is never expanded with search domains.
fn to_fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{}.", domain)
    }
}

/// Map a resolver error onto the three-way answer.
pub(crate) fn classify_error(err: &ResolveError) -> DnsAnswer {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            classify_response_code(*response_code, || err.to_string())
        }
        _ => DnsAnswer::Failure(err.to_string()),
    }
}

/// NXDOMAIN and NOERROR-without-data are the only negative answers.
///
/// `describe` is only called for the failure branch.
pub(crate) fn classify_response_code<F>(code: ResponseCode, describe: F) -> DnsAnswer
where
    F: FnOnce() -> String,
{
    match code {
        ResponseCode::NXDomain => DnsAnswer::Negative(NegativeAnswer::NoSuchDomain),
        ResponseCode::NoError => DnsAnswer::Negative(NegativeAnswer::NoRecords),
        _ => DnsAnswer::Failure(describe()),
    }
}
