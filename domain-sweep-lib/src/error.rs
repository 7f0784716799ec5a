//! Error handling for sweep operations.
//!
//! Only configuration and output failures ever reach the caller of a run.
//! DNS failures are folded into [`crate::DnsAnswer`] and WHOIS failures into
//! [`crate::WhoisRecord::detail`], so they show up here only while a single
//! lookup is in progress.

use std::fmt;
use std::time::Duration;

/// Main error type for sweep operations.
#[derive(Debug, Clone)]
pub enum SweepError {
    /// Invalid run configuration (bad lengths, empty alphabet, bad address...)
    ConfigError { message: String },

    /// WHOIS lookup failures (missing binary, empty reply, rate limiting)
    WhoisError { domain: String, message: String },

    /// Timeout errors when a lookup takes too long
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// File I/O errors for config files and the output artifact
    FileError { path: String, message: String },
}

impl SweepError {
    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error stops a run before any query is issued.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::WhoisError { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for SweepError {}

impl From<toml::de::Error> for SweepError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
