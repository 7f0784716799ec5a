//! Utility functions for input normalization and parsing.
//!
//! Helpers shared by the config layer and the CLI for turning user-supplied
//! strings (TLDs, resolver addresses, durations) into typed values.

use crate::error::SweepError;
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Normalize a TLD so it can be appended directly to a prefix.
///
/// Surrounding whitespace is dropped and a leading dot is added when
/// missing, so `"com"` and `".com"` both become `".com"`.
pub fn normalize_tld(tld: &str) -> String {
    let trimmed = tld.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

/// Parse an upstream nameserver address.
///
/// Accepts a bare IP (`1.1.1.1`, `2606:4700::1111`), which gets port 53,
/// or a socket address (`8.8.8.8:5353`, `[2606:4700::1111]:53`).
///
/// # Errors
///
/// Returns `SweepError::ConfigError` if the string is neither form.
pub fn parse_nameserver(input: &str) -> Result<SocketAddr, SweepError> {
    let input = input.trim();

    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }

    input
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, 53))
        .map_err(|_| SweepError::config(format!("Invalid nameserver address '{}'", input)))
}

/// Parse every entry of a nameserver list, failing on the first bad one.
pub fn parse_nameservers<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<SocketAddr>, SweepError> {
    inputs.iter().map(|s| parse_nameserver(s.as_ref())).collect()
}

/// Parse a duration string like "500ms", "5s", "2m" (bare numbers are seconds).
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    if let Some(ms) = input.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = input.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = input.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        input.parse::<u64>().ok().map(Duration::from_secs)
    }
}

/// Characters of `alphabet` that appear more than once, in first-seen order.
///
/// Repeats are allowed but make the enumerator emit duplicate candidates.
pub fn repeated_chars(alphabet: &[char]) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for &c in alphabet {
        if !seen.insert(c) && !repeated.contains(&c) {
            repeated.push(c);
        }
    }
    repeated
}

/// Characters of `alphabet` that cannot appear in a hostname label.
pub fn non_hostname_chars(alphabet: &[char]) -> Vec<char> {
    alphabet
        .iter()
        .copied()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        .collect()
}
