//! WHOIS lookups for domains the DNS scan marked available.
//!
//! This module shells out to the system's `whois` command and returns the raw
//! registry text. Parsing the text is left to whoever consumes the records;
//! the sweep only needs "what did the registry say" or "why did it fail".

use crate::error::SweepError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Something that can fetch raw WHOIS text for a domain.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Perform one lookup. Errors are turned into record details by the caller.
    async fn lookup(&self, domain: &str) -> Result<String, SweepError>;
}

/// WHOIS client using the system's `whois` command.
#[derive(Debug, Clone, Default)]
pub struct WhoisClient {
    /// Timeout for one lookup; `None` waits for the command to exit
    timeout: Option<Duration>,
}

impl WhoisClient {
    /// Create a new WHOIS client with no timeout.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Create a new WHOIS client with an optional per-lookup timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Execute the system whois command and return its stdout.
    async fn execute_whois_command(&self, domain: &str) -> Result<String, SweepError> {
        let output = Command::new("whois")
            .arg(domain)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                SweepError::whois(
                    domain,
                    format!(
                        "Failed to execute whois command: {}. Make sure 'whois' is installed.",
                        e
                    ),
                )
            })?;

        interpret_reply(domain, &output.stdout, &output.stderr, &output.status)
    }
}

/// Turn a finished `whois` process into the registry text or an error.
///
/// A rate-limit notice is an error, but the message keeps the server's text
/// so it still ends up in the enrichment record.
fn interpret_reply(
    domain: &str,
    stdout: &[u8],
    stderr: &[u8],
    status: &dyn std::fmt::Display,
) -> Result<String, SweepError> {
    let stdout = String::from_utf8_lossy(stdout).into_owned();

    if stdout.trim().is_empty() {
        let stderr = String::from_utf8_lossy(stderr);
        let reason = if stderr.trim().is_empty() {
            format!("whois exited with {} and no output", status)
        } else {
            stderr.trim().to_string()
        };
        return Err(SweepError::whois(domain, reason));
    }

    if is_rate_limited(&stdout) {
        return Err(SweepError::whois(
            domain,
            format!("Rate limited by WHOIS server:\n{}", stdout.trim()),
        ));
    }

    Ok(stdout)
}

#[async_trait]
impl WhoisLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<String, SweepError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.execute_whois_command(domain))
                .await
                .map_err(|_| SweepError::timeout("WHOIS lookup", timeout))?,
            None => self.execute_whois_command(domain).await,
        }
    }
}

/// Check if the WHOIS output indicates rate limiting.
fn is_rate_limited(output: &str) -> bool {
    let output_lower = output.to_lowercase();
    let rate_limit_patterns = [
        "rate limit exceeded",
        "too many requests",
        "quota exceeded",
        "limit exceeded",
        "rate-limited",
        "too many requests from your ip",
    ];

    rate_limit_patterns
        .iter()
        .any(|pattern| output_lower.contains(pattern))
}

/// Check if the system has a working whois command.
///
/// Lets the CLI warn up front instead of producing one error record per
/// available domain.
pub async fn is_whois_available() -> bool {
    match Command::new("whois").arg("--version").output().await {
        Ok(output) => output.status.success() || !output.stdout.is_empty(),
        Err(_) => false,
    }
}
