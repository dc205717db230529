//! Client configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (default: ~/.config/think/client.toml), table `[client]`
//! - environment variables (`THINK_*`)
//!
//! # Example
//!
//! ```rust,no_run
//! use think_client::config::ClientConfig;
//!
//! // Default path, or environment variables when there is no file
//! let config = ClientConfig::load().expect("Failed to load config");
//! config.validate().expect("Invalid config");
//! ```
//!
//! ```toml
//! [client]
//! base_url = "${THINK_API_URL}"
//! timeout_seconds = 10
//! save_success_statuses = [200, 201]
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use think_core::defaults::{
    API_URL, DELETE_SUCCESS_STATUS, ENV_API_URL, ENV_DELETE_STATUSES, ENV_SAVE_STATUSES,
    ENV_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, SAVE_SUCCESS_STATUS,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for think_core::Error {
    fn from(e: ConfigError) -> Self {
        think_core::Error::Config(e.to_string())
    }
}

/// Settings for talking to the record server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the server, without the `/api/...` suffix.
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Statuses that count as a successful save.
    pub save_success_statuses: Vec<u16>,
    /// Statuses that count as a successful delete.
    pub delete_success_statuses: Vec<u16>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_URL.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            save_success_statuses: vec![SAVE_SUCCESS_STATUS],
            delete_success_statuses: vec![DELETE_SUCCESS_STATUS],
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Default config file path.
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("think");
        path.push("client.toml");
        path
    }

    /// Load from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading client config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            Ok(Self::from_env())
        }
    }

    /// Load from a TOML file. `${VAR}` placeholders are substituted first.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = Self::substitute_env_vars(&content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            client: ClientConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        let config = root.client;
        config.validate()?;
        Ok(config)
    }

    /// Load from `THINK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or unparseable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup(ENV_API_URL).unwrap_or(defaults.base_url),
            timeout_seconds: lookup(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            save_success_statuses: lookup(ENV_SAVE_STATUSES)
                .and_then(|v| parse_status_list(&v))
                .unwrap_or(defaults.save_success_statuses),
            delete_success_statuses: lookup(ENV_DELETE_STATUSES)
                .and_then(|v| parse_status_list(&v))
                .unwrap_or(defaults.delete_success_statuses),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        for (name, statuses) in [
            ("save_success_statuses", &self.save_success_statuses),
            ("delete_success_statuses", &self.delete_success_statuses),
        ] {
            if statuses.is_empty() {
                return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
            }
            if let Some(bad) = statuses.iter().find(|s| !(100..=599).contains(*s)) {
                return Err(ConfigError::Validation(format!(
                    "{} contains invalid HTTP status {}",
                    name, bad
                )));
            }
        }

        Ok(())
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    /// Unknown variables are left in place.
    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

/// Parse `"200, 201"` into statuses. `None` when nothing valid remains.
fn parse_status_list(raw: &str) -> Option<Vec<u16>> {
    let statuses: Vec<u16> = raw
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if statuses.is_empty() {
        None
    } else {
        Some(statuses)
    }
}
