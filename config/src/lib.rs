//! Configuration for the Med Alliance client.
//!
//! Loaded from `$MEDALLIANCE_CONFIG` when set, otherwise
//! `~/.medalliance/config.toml`. A missing file means defaults.
//!
//! ```toml
//! [backend]
//! base_url = "https://api.medalliance.app/v1"
//! token = "${MEDALLIANCE_TOKEN}"
//! timeout_secs = 30
//!
//! [profile]
//! success_message_ms = 3000
//!
//! [log]
//! filter = "medalliance=debug"
//!
//! [validation.bio]
//! checks = [{ check = "max_length", max = 300 }]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use medalliance_core::{FieldRule, RuleSet};
use medalliance_types::FieldKey;

pub const CONFIG_ENV_VAR: &str = "MEDALLIANCE_CONFIG";
pub const DEFAULT_BASE_URL: &str = "https://api.medalliance.app/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SUCCESS_MESSAGE_MS: u64 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MedAllianceConfig {
    pub backend: Option<BackendConfig>,
    pub profile: Option<ProfileConfig>,
    pub log: Option<LogConfig>,
    /// Per-field validation rules replacing the built-in rule for that field.
    #[serde(default)]
    pub validation: BTreeMap<FieldKey, FieldRule>,
}

#[derive(Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token. `${VAR}` references are expanded from the environment.
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Permit plain `http://` base URLs.
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allow_http: false,
        }
    }
}

// Manual Debug impl to prevent leaking the token in logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field(
                "token",
                &if self.token.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("allow_http", &self.allow_http)
            .finish()
    }
}

impl BackendConfig {
    /// Token with `${VAR}` references resolved; blank results count as absent.
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(expand_env_vars)
            .filter(|token| !token.trim().is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileConfig {
    /// How long "Changes saved!" stays visible.
    #[serde(default = "default_success_message_ms")]
    pub success_message_ms: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            success_message_ms: DEFAULT_SUCCESS_MESSAGE_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_success_message_ms() -> u64 {
    DEFAULT_SUCCESS_MESSAGE_MS
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

impl MedAllianceConfig {
    /// Load from the default location. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&content).map_err(|source| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, source);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn backend(&self) -> BackendConfig {
        self.backend.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn success_message_duration(&self) -> Duration {
        let ms = self
            .profile
            .as_ref()
            .map_or(DEFAULT_SUCCESS_MESSAGE_MS, |p| p.success_message_ms);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.log.as_ref().and_then(|log| log.filter.as_deref())
    }

    /// Built-in rules with this config's overrides applied.
    #[must_use]
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::with_overrides(self.validation.clone())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".medalliance").join("config.toml"))
}
