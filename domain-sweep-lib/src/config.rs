//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files, merging them
//! with proper precedence rules, and layering the result onto a
//! [`RunConfig`].

use crate::error::SweepError;
use crate::types::RunConfig;
use crate::utils::{parse_duration, parse_nameserver, parse_nameservers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched during discovery, lowest precedence first.
const LOCAL_CONFIG_FILES: [&str; 2] = [".domain-sweep.toml", "domain-sweep.toml"];

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Candidate alphabet, one character per symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chars: Option<String>,

    /// TLD suffixes, with or without the leading dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,

    /// Maximum number of DNS queries in flight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Upstream nameservers ("IP" or "IP:port")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<Vec<String>>,

    /// Output file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,

    /// Per-query DNS timeout (as string, e.g., "500ms", "5s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_timeout: Option<String>,

    /// Per-lookup WHOIS timeout (as string, e.g., "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_timeout: Option<String>,

    /// Run WHOIS enrichment after the scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois: Option<bool>,
}

impl DefaultsConfig {
    /// Layer every value set here onto `config`.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::ConfigError` for unparseable nameservers or
    /// durations.
    pub fn apply_to(&self, mut config: RunConfig) -> Result<RunConfig, SweepError> {
        if let Some(chars) = &self.chars {
            config = config.with_alphabet(chars);
        }
        if let Some(tlds) = &self.tlds {
            config = config.with_tlds(tlds);
        }
        if let Some(min_len) = self.min_len {
            config.min_len = min_len;
        }
        if let Some(max_len) = self.max_len {
            config.max_len = max_len;
        }
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(dns) = &self.dns {
            config = config.with_nameservers(parse_nameservers(dns)?);
        }
        if let Some(out) = &self.out {
            config = config.with_output_path(out.clone());
        }
        if let Some(timeout) = &self.dns_timeout {
            config = config.with_dns_timeout(Some(parse_timeout_value("dns_timeout", timeout)?));
        }
        if let Some(timeout) = &self.whois_timeout {
            config =
                config.with_whois_timeout(Some(parse_timeout_value("whois_timeout", timeout)?));
        }
        if let Some(whois) = self.whois {
            config = config.with_whois(whois);
        }
        Ok(config)
    }
}

fn parse_timeout_value(key: &str, value: &str) -> Result<std::time::Duration, SweepError> {
    parse_duration(value).ok_or_else(|| {
        SweepError::config(format!(
            "Invalid {} format '{}'. Use format like '500ms', '5s', '2m'",
            key, value
        ))
    })
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Directory searched during discovery
    base_dir: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a manager that discovers files in the current directory.
    pub fn new() -> Self {
        Self::in_dir(".")
    }

    /// Create a manager that discovers files in `dir`.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if reading, parsing, or
    /// validation fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SweepError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SweepError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SweepError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");

        Ok(config)
    }

    /// Discover and load local configuration files.
    ///
    /// `.domain-sweep.toml` is loaded first and `domain-sweep.toml` on top of
    /// it, so values in the visible file win. Returns an empty configuration
    /// when neither exists.
    pub fn discover_and_load(&self) -> Result<FileConfig, SweepError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        for name in LOCAL_CONFIG_FILES {
            let path = self.base_dir.join(name);
            if path.exists() {
                let config = self.load_file(&path)?;
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(path);
            }
        }

        if loaded_files.len() > 1 {
            tracing::warn!(
                files = ?loaded_files,
                "multiple config files found, later files take precedence"
            );
        }

        Ok(merged_config)
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower_defaults), Some(higher_defaults)) => Some(DefaultsConfig {
                    chars: higher_defaults.chars.or(lower_defaults.chars),
                    tlds: higher_defaults.tlds.or(lower_defaults.tlds),
                    min_len: higher_defaults.min_len.or(lower_defaults.min_len),
                    max_len: higher_defaults.max_len.or(lower_defaults.max_len),
                    concurrency: higher_defaults.concurrency.or(lower_defaults.concurrency),
                    dns: higher_defaults.dns.or(lower_defaults.dns),
                    out: higher_defaults.out.or(lower_defaults.out),
                    dns_timeout: higher_defaults.dns_timeout.or(lower_defaults.dns_timeout),
                    whois_timeout: higher_defaults.whois_timeout.or(lower_defaults.whois_timeout),
                    whois: higher_defaults.whois.or(lower_defaults.whois),
                }),
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
        }
    }

    /// Validate a configuration for common issues.
    pub fn validate_config(&self, config: &FileConfig) -> Result<(), SweepError> {
        let Some(defaults) = &config.defaults else {
            return Ok(());
        };

        if defaults.concurrency == Some(0) {
            return Err(SweepError::config("Concurrency must be at least 1"));
        }

        if defaults.min_len == Some(0) {
            return Err(SweepError::config("min_len must be at least 1"));
        }

        if let (Some(min_len), Some(max_len)) = (defaults.min_len, defaults.max_len) {
            if min_len > max_len {
                return Err(SweepError::config(format!(
                    "min_len ({}) cannot be greater than max_len ({})",
                    min_len, max_len
                )));
            }
        }

        if let Some(chars) = &defaults.chars {
            if chars.is_empty() {
                return Err(SweepError::config("chars cannot be empty"));
            }
        }

        if let Some(tlds) = &defaults.tlds {
            if tlds.is_empty() {
                return Err(SweepError::config("tlds cannot be an empty list"));
            }
        }

        if let Some(dns) = &defaults.dns {
            if dns.is_empty() {
                return Err(SweepError::config("dns cannot be an empty list"));
            }
            for server in dns {
                parse_nameserver(server)?;
            }
        }

        if let Some(timeout) = &defaults.dns_timeout {
            parse_timeout_value("dns_timeout", timeout)?;
        }
        if let Some(timeout) = &defaults.whois_timeout {
            parse_timeout_value("whois_timeout", timeout)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tempfile::{tempdir, NamedTempFile};

    fn temp_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_load_valid_config() {
        let temp_file = temp_config(
            r#"
[defaults]
chars = "abc123"
tlds = [".com", "net"]
min_len = 2
max_len = 3
concurrency = 200
dns = ["1.1.1.1", "8.8.8.8:5353"]
out = "found.txt"
dns_timeout = "500ms"
whois = false
"#,
        );

        let manager = ConfigManager::new();
        let config = manager.load_file(temp_file.path()).unwrap();

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.chars.as_deref(), Some("abc123"));
        assert_eq!(defaults.concurrency, Some(200));
        assert_eq!(defaults.whois, Some(false));
        assert_eq!(defaults.whois_timeout, None);
    }

    #[test]
    fn test_apply_to_overrides_only_set_values() {
        let defaults = DefaultsConfig {
            chars: Some("xy".to_string()),
            tlds: Some(vec!["io".to_string()]),
            max_len: Some(4),
            dns: Some(vec!["9.9.9.9".to_string(), "8.8.8.8:5353".to_string()]),
            dns_timeout: Some("2s".to_string()),
            ..Default::default()
        };

        let config = defaults.apply_to(RunConfig::default()).unwrap();

        assert_eq!(config.alphabet, vec!['x', 'y']);
        assert_eq!(config.tlds, vec![".io".to_string()]);
        assert_eq!(config.min_len, crate::DEFAULT_MIN_LEN);
        assert_eq!(config.max_len, 4);
        assert_eq!(config.concurrency, crate::DEFAULT_CONCURRENCY);
        assert_eq!(
            config.nameservers,
            vec![
                "9.9.9.9:53".parse::<SocketAddr>().unwrap(),
                "8.8.8.8:5353".parse::<SocketAddr>().unwrap()
            ]
        );
        assert_eq!(config.dns_timeout, Some(Duration::from_secs(2)));
        assert!(config.whois_enabled);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "[defaults]\nconcurrency = 0\n",
            "[defaults]\nmin_len = 0\n",
            "[defaults]\nmin_len = 4\nmax_len = 2\n",
            "[defaults]\ndns = [\"not-an-ip\"]\n",
            "[defaults]\ndns_timeout = \"soon\"\n",
            "[defaults]\ntlds = []\n",
            "[defaults]\nchars = \"\"\n",
        ];

        let manager = ConfigManager::new();
        for content in cases {
            let temp_file = temp_config(content);
            let result = manager.load_file(temp_file.path());
            assert!(
                matches!(result, Err(SweepError::ConfigError { .. })),
                "expected config error for {:?}",
                content
            );
        }
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let temp_file = temp_config("[defaults\nchars = ");
        let err = ConfigManager::new().load_file(temp_file.path()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempdir().unwrap();
        let err = ConfigManager::new()
            .load_file(dir.path().join("nope.toml"))
            .unwrap_err();
        assert!(matches!(err, SweepError::FileError { .. }));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new();

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(10),
                chars: Some("abc".to_string()),
                whois: Some(false),
                ..Default::default()
            }),
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(25),
                whois: Some(true),
                ..Default::default()
            }),
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(25)); // Higher wins
        assert_eq!(defaults.chars.as_deref(), Some("abc")); // Lower preserved
        assert_eq!(defaults.whois, Some(true));
    }

    #[test]
    fn test_discovery_layers_visible_file_over_hidden() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".domain-sweep.toml"),
            "[defaults]\nchars = \"ab\"\nconcurrency = 5\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("domain-sweep.toml"),
            "[defaults]\nconcurrency = 7\n",
        )
        .unwrap();

        let config = ConfigManager::in_dir(dir.path()).discover_and_load().unwrap();
        let defaults = config.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(7));
        assert_eq!(defaults.chars.as_deref(), Some("ab"));
    }

    #[test]
    fn test_discovery_without_files_is_empty() {
        let dir = tempdir().unwrap();
        let config = ConfigManager::in_dir(dir.path()).discover_and_load().unwrap();
        assert!(config.defaults.is_none());
    }
}
