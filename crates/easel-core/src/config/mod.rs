//! Configuration system for easel.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! config file (`.toml`, `.json`, `.yaml`), and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

use crate::conversation::{DEFAULT_HISTORY_CAP, DEFAULT_SYSTEM_PREAMBLE};
use crate::error::{EaselError, EaselResult};
use crate::session::DEFAULT_SESSION_TTL_SECS;
use crate::traits::{CompletionConfig, ImageConfig};

/// Deployment mode. Development exposes provider error details to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
    /// Directory served as a static fallback, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    /// Seconds between sweeps of expired sessions.
    pub purge_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mode: RunMode::default(),
            static_dir: None,
            purge_interval_secs: 600,
        }
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.mode == RunMode::Production
    }
}

/// Conversation and session policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Maximum turns kept per session, system turn included.
    pub history_cap: usize,
    /// Idle lifetime of a session in seconds.
    pub session_ttl_secs: u64,
    /// Instruction preamble placed at index 0 of every conversation.
    pub system_preamble: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_cap: DEFAULT_HISTORY_CAP,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            system_preamble: DEFAULT_SYSTEM_PREAMBLE.to_string(),
        }
    }
}

/// Main easel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EaselConfig {
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub completion: CompletionConfig,
    pub image: ImageConfig,
}

impl EaselConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> EaselResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| EaselError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| EaselError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| EaselError::Configuration(e.to_string())),
            _ => Err(EaselError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from the file named by `EASEL_CONFIG` (if set),
    /// then apply environment overrides.
    pub fn load() -> EaselResult<Self> {
        let mut config = match std::env::var("EASEL_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from process environment variables.
    pub fn apply_env(&mut self) -> EaselResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Reads:
    /// - `EASEL_HOST`, `EASEL_PORT`, `EASEL_ENV`, `EASEL_STATIC_DIR`
    /// - `EASEL_HISTORY_CAP`, `EASEL_SESSION_TTL_SECS`
    /// - `EASEL_COMPLETION_MODEL`, `EASEL_COMPLETION_BASE_URL`, `GROQ_API_KEY`
    /// - `EASEL_IMAGE_BASE_URL`, `PIXAZO_API_KEY`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> EaselResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("EASEL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("EASEL_PORT") {
            self.server.port = parse_var("EASEL_PORT", &port)?;
        }
        if let Some(mode) = lookup("EASEL_ENV") {
            self.server.mode = mode.parse().map_err(|_| {
                EaselError::Configuration(format!(
                    "EASEL_ENV must be 'development' or 'production', got '{}'",
                    mode
                ))
            })?;
        }
        if let Some(dir) = lookup("EASEL_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(cap) = lookup("EASEL_HISTORY_CAP") {
            self.relay.history_cap = parse_var("EASEL_HISTORY_CAP", &cap)?;
        }
        if let Some(ttl) = lookup("EASEL_SESSION_TTL_SECS") {
            self.relay.session_ttl_secs = parse_var("EASEL_SESSION_TTL_SECS", &ttl)?;
        }

        if let Some(model) = lookup("EASEL_COMPLETION_MODEL") {
            self.completion.model = model;
        }
        if let Some(url) = lookup("EASEL_COMPLETION_BASE_URL") {
            self.completion.base_url = Some(url);
        }
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.completion.api_key = Some(key);
        }

        if let Some(url) = lookup("EASEL_IMAGE_BASE_URL") {
            self.image.base_url = Some(url);
        }
        if let Some(key) = lookup("PIXAZO_API_KEY") {
            self.image.api_key = Some(key);
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> EaselResult<T> {
    value.trim().parse().map_err(|_| {
        EaselError::Configuration(format!("invalid value for {}: '{}'", key, value))
    })
}
