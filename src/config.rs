//! Application configuration.
//!
//! Stored in `.backoffice/config.yaml`:
//! - the remote endpoint and API key
//! - list engine tuning (quiet period, page sizes, out-of-range policy)
//! - the request timeout
//!
//! `BACKOFFICE_ENDPOINT` and `BACKOFFICE_API_KEY` override the file.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BackofficeError, Result};
use crate::list::coordinator::{CoordinatorOptions, OutOfRangePolicy};
use crate::list::query::{DEFAULT_PAGE_SIZES, PageSizes, SortSpec};
use crate::paths::backoffice_root;

/// Keys accepted by `config get` / `config set`
pub const VALID_KEYS: &[&str] = &[
    "remote.endpoint",
    "remote.api_key",
    "list.quiet_period_ms",
    "list.page_sizes",
    "list.default_page_size",
    "list.out_of_range",
    "request_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub list: ListConfig,

    /// Request timeout in seconds (default: 30, 0 = no timeout)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            list: ListConfig::default(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Where the list RPC lives
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RemoteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// List engine tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListConfig {
    /// Debounce quiet period in milliseconds
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<u32>,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

fn default_quiet_period_ms() -> u64 {
    500
}

fn default_page_sizes() -> Vec<u32> {
    DEFAULT_PAGE_SIZES.to_vec()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZES[0]
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        backoffice_root().join("config.yaml")
    }

    /// Load configuration from file, or return defaults if there is none
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            BackofficeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {e}", path.display()),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BackofficeError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {e}", parent.display()),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            BackofficeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {e}", path.display()),
            ))
        })?;

        // The file may hold an API key: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Reject page size settings the list engine would refuse
    pub fn validate(&self) -> Result<()> {
        let sizes = PageSizes::new(self.list.page_sizes.clone())?;
        if !sizes.contains(self.list.default_page_size) {
            return Err(BackofficeError::Config(format!(
                "list.default_page_size {} is not one of list.page_sizes {:?}",
                self.list.default_page_size,
                sizes.as_slice()
            )));
        }
        Ok(())
    }

    /// Endpoint from `BACKOFFICE_ENDPOINT`, falling back to the file
    pub fn endpoint(&self) -> Option<String> {
        if let Ok(endpoint) = env::var("BACKOFFICE_ENDPOINT")
            && !endpoint.is_empty()
        {
            return Some(endpoint);
        }
        self.remote.endpoint.clone()
    }

    /// API key from `BACKOFFICE_API_KEY`, falling back to the file
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = env::var("BACKOFFICE_API_KEY")
            && !key.is_empty()
        {
            return Some(key);
        }
        self.remote.api_key.clone()
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.list.quiet_period_ms)
    }

    /// `None` when timeouts are disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout > 0).then(|| Duration::from_secs(self.request_timeout))
    }

    /// Coordinator settings for a screen sorted by `sort` initially
    pub fn coordinator_options(&self, sort: SortSpec) -> Result<CoordinatorOptions> {
        let sizes = PageSizes::new(self.list.page_sizes.clone())?;
        Ok(CoordinatorOptions::new(sort)
            .with_quiet_period(self.quiet_period())
            .with_page_sizes(sizes, self.list.default_page_size)
            .with_out_of_range(self.list.out_of_range))
    }

    /// Read a single value as text. Secrets come back unmasked; callers mask.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "remote.endpoint" => self.endpoint(),
            "remote.api_key" => self.api_key(),
            "list.quiet_period_ms" => Some(self.list.quiet_period_ms.to_string()),
            "list.page_sizes" => Some(
                self.list
                    .page_sizes
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "list.default_page_size" => Some(self.list.default_page_size.to_string()),
            "list.out_of_range" => Some(
                match self.list.out_of_range {
                    OutOfRangePolicy::Reset => "reset",
                    OutOfRangePolicy::Empty => "empty",
                }
                .to_string(),
            ),
            "request_timeout" => Some(self.request_timeout.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Parse and store a single value. The whole config is validated and left
    /// untouched when the new value would make it invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        next.apply(key, value)?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "remote.endpoint" => {
                url::Url::parse(value)?;
                self.remote.endpoint = Some(value.to_string());
            }
            "remote.api_key" => self.remote.api_key = Some(value.to_string()),
            "list.quiet_period_ms" => self.list.quiet_period_ms = parse_number(key, value)?,
            "list.page_sizes" => {
                self.list.page_sizes = value
                    .split(',')
                    .map(|part| parse_number(key, part.trim()))
                    .collect::<Result<Vec<u32>>>()?;
            }
            "list.default_page_size" => self.list.default_page_size = parse_number(key, value)?,
            "list.out_of_range" => {
                self.list.out_of_range = match value.trim().to_lowercase().as_str() {
                    "reset" => OutOfRangePolicy::Reset,
                    "empty" => OutOfRangePolicy::Empty,
                    _ => {
                        return Err(BackofficeError::Config(format!(
                            "invalid value '{value}' for list.out_of_range. Expected: reset or empty"
                        )));
                    }
                }
            }
            "request_timeout" => self.request_timeout = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> BackofficeError {
    BackofficeError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N> {
    value.trim().parse().map_err(|_| {
        BackofficeError::Config(format!("invalid value '{value}' for {key}. Expected a number"))
    })
}
