//! Candidate domain enumeration.
//!
//! Produces every `prefix + tld` where the prefix is an ordered tuple over the
//! configured alphabet, for each length in the configured range.
//!
//! # Ordering
//!
//! - Lengths ascend from `min_len` to `max_len`
//! - Within a length, prefixes count in base `|alphabet|` (odometer style,
//!   rightmost position fastest), so `"ab"` at length 2 yields `aa ab ba bb`
//! - For each prefix, TLDs follow the configured order
//!
//! # Examples
//!
//! ```
//! use domain_sweep_lib::{enumerate_candidates, RunConfig};
//!
//! let config = RunConfig::default()
//!     .with_alphabet("ab")
//!     .with_lengths(1, 1)
//!     .with_tlds([".com", ".net"]);
//!
//! let names: Vec<String> = enumerate_candidates(&config)
//!     .unwrap()
//!     .map(|d| d.into_string())
//!     .collect();
//! assert_eq!(names, ["a.com", "a.net", "b.com", "b.net"]);
//! ```

use crate::error::SweepError;
use crate::types::{CandidateDomain, RunConfig};

/// Exact number of candidates a config will produce.
///
/// # Errors
///
/// Returns `SweepError::ConfigError` if the config is invalid or the count
/// does not fit in `usize`.
pub fn candidate_count(config: &RunConfig) -> Result<usize, SweepError> {
    config.validate()?;
    count_for(config.alphabet.len(), config.min_len, config.max_len, config.tlds.len())
}

fn count_for(
    alphabet_len: usize,
    min_len: usize,
    max_len: usize,
    tld_count: usize,
) -> Result<usize, SweepError> {
    let too_large = || SweepError::config("Search space is too large to enumerate");

    let mut total: usize = 0;
    for len in min_len..=max_len {
        let exponent = u32::try_from(len).map_err(|_| too_large())?;
        let prefixes = alphabet_len.checked_pow(exponent).ok_or_else(too_large)?;
        let names = prefixes.checked_mul(tld_count).ok_or_else(too_large)?;
        total = total.checked_add(names).ok_or_else(too_large)?;
    }
    Ok(total)
}

/// Validate `config` and return a fresh enumerator over its candidates.
///
/// # Errors
///
/// Returns `SweepError::ConfigError` when `min_len > max_len`, the alphabet
/// or TLD list is empty, or the search space overflows `usize`.
pub fn enumerate_candidates(config: &RunConfig) -> Result<Candidates, SweepError> {
    let total = candidate_count(config)?;
    Ok(Candidates::start(config, total))
}

/// Lazy, finite iterator over candidate domains.
///
/// Cloning yields an independent iterator from the same position, so a
/// fresh clone replays the sequence from the start.
#[derive(Debug, Clone)]
pub struct Candidates {
    alphabet: Vec<char>,
    tlds: Vec<String>,
    max_len: usize,
    /// One index into `alphabet` per prefix position
    counters: Vec<usize>,
    /// Cached prefix for the current `counters`
    prefix: String,
    tld_idx: usize,
    remaining: usize,
}

impl Candidates {
    /// Callers must have validated `config` and computed `total` from it.
    pub(crate) fn start(config: &RunConfig, total: usize) -> Self {
        let counters = vec![0; config.min_len];
        let prefix = render_prefix(&config.alphabet, &counters);
        Self {
            alphabet: config.alphabet.clone(),
            tlds: config.tlds.clone(),
            max_len: config.max_len,
            counters,
            prefix,
            tld_idx: 0,
            remaining: total,
        }
    }

    /// Move to the next prefix, growing the length when the odometer wraps.
    fn advance_prefix(&mut self) {
        let radix = self.alphabet.len();
        let mut carry = true;
        for counter in self.counters.iter_mut().rev() {
            *counter += 1;
            if *counter < radix {
                carry = false;
                break;
            }
            *counter = 0;
        }

        if carry {
            let next_len = self.counters.len() + 1;
            if next_len > self.max_len {
                return;
            }
            self.counters = vec![0; next_len];
        }

        self.prefix = render_prefix(&self.alphabet, &self.counters);
    }
}

fn render_prefix(alphabet: &[char], counters: &[usize]) -> String {
    counters.iter().map(|&i| alphabet[i]).collect()
}

impl Iterator for Candidates {
    type Item = CandidateDomain;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let domain = CandidateDomain::new(&self.prefix, &self.tlds[self.tld_idx]);
        self.remaining -= 1;

        self.tld_idx += 1;
        if self.tld_idx == self.tlds.len() {
            self.tld_idx = 0;
            if self.remaining > 0 {
                self.advance_prefix();
            }
        }

        Some(domain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Candidates {}

impl std::iter::FusedIterator for Candidates {}
