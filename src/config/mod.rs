use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RenderdeskError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const ENV_API_URL: &str = "RENDERDESK_API_URL";
pub const ENV_HOME: &str = "RENDERDESK_HOME";

/// Configuration file format (~/.renderdesk/renderdesk.toml).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory rendered documents are written to
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load config from a path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| RenderdeskError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load the config file and apply environment overrides.
    pub fn load_effective(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        if let Some(url) = env_non_empty(ENV_API_URL) {
            config.api.base_url = url;
        }
        config.api.base_url = normalize_base_url(&config.api.base_url)?;
        Ok(config)
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme and a host.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let Some((scheme, rest)) = trimmed.split_once("://") else {
        return Err(RenderdeskError::Config(format!(
            "base url must use http:// or https://: {}",
            raw
        )));
    };
    if scheme != "http" && scheme != "https" {
        return Err(RenderdeskError::Config(format!(
            "base url must use http:// or https://: {}",
            raw
        )));
    }
    if rest.is_empty() || rest.starts_with('/') {
        return Err(RenderdeskError::Config(format!(
            "base url must include a host: {}",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the renderdesk data directory (`$RENDERDESK_HOME` or ~/.renderdesk).
pub fn renderdesk_dir() -> PathBuf {
    if let Some(dir) = env_non_empty(ENV_HOME) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".renderdesk")
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    renderdesk_dir().join("renderdesk.toml")
}

/// Get the persisted session path.
pub fn session_path() -> PathBuf {
    renderdesk_dir().join("session.json")
}
