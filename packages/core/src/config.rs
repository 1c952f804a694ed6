//! Client configuration: where the node lives and how long to wait for it.
//!
//! The configuration file is INI, stored at `<config dir>/eef/config`:
//!
//! ```ini
//! [node]
//! url = http://127.0.0.1:8000
//! timeout_secs = 30
//! ```
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `EEF_CONFIG` | Path of the configuration file, replacing the default location |
//! | `EEF_NODE__URL` | Overrides `[node] url` from the file |
//! | `EEF_NODE__TIMEOUT_SECS` | Overrides `[node] timeout_secs` from the file |
//!
//! The CLI additionally accepts `--node-url` / `EEF_NODE_URL`, which bypasses
//! the file altogether via [`ClientConfig::new`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "EEF_CONFIG";

/// Request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("eef config does not exist ({}).", .path.display())]
    Missing { path: PathBuf },

    #[error("could not determine the eef config directory; set EEF_CONFIG.")]
    NoConfigDir,

    #[error("invalid eef config format: {reason}.")]
    Invalid { reason: String },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Validated client configuration, passed explicitly into
/// [`crate::NodeClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute http(s) URL of the node, without a trailing slash.
    pub node_url: String,

    /// Upper bound on a single request, connection included.
    pub timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    node: RawNodeSection,
}

#[derive(Debug, Default, Deserialize)]
struct RawNodeSection {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Build a configuration from a node URL, validating it.
    pub fn new(node_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            node_url: validate_node_url(node_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "eef")
            .map(|dirs| dirs.config_dir().join("config"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `$EEF_CONFIG`, or from [`ClientConfig::default_path`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_path()?,
        };
        Self::from_file(&path)
    }

    /// Load from an explicit INI file, applying `EEF_NODE__*` overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_sources(path, environment())
    }

    fn from_sources(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "reading configuration");

        let raw: RawConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini).required(true))
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<RawConfig>())
            .map_err(|e| ConfigError::invalid(e.to_string()))?;

        let url = raw
            .node
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::invalid("missing `url` in the [node] section"))?;

        let mut config = Self::new(&url)?;
        if let Some(secs) = raw.node.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::invalid("`timeout_secs` must be positive"));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// `EEF_NODE__URL` -> `node.url`. Without an explicit prefix separator the
/// `config` crate would expect `EEF__NODE__URL`.
fn environment() -> Environment {
    Environment::with_prefix("EEF")
        .prefix_separator("_")
        .separator("__")
}

/// Accept only absolute http(s) URLs with a host; strip trailing slashes so
/// request paths can be appended directly.
fn validate_node_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::invalid(format!("node url {trimmed:?} is not a valid URL ({e})")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(format!(
            "node url {trimmed:?} must use http or https"
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::invalid(format!("node url {trimmed:?} has no host")));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::invalid(format!(
            "node url {trimmed:?} must not carry a query or fragment"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
