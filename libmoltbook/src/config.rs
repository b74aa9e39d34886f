//! Configuration for the Moltbook client tools

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{MoltbookError, Result};
use crate::heartbeat::DEFAULT_STATE_FILE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub heartbeat: HeartbeatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    pub state_file: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            state_file: DEFAULT_STATE_FILE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. A missing file yields
    /// the defaults; `MOLTBOOK_BASE_URL` overrides the base URL either way.
    pub fn load() -> Result<Self> {
        let path = resolve_config_path()?;
        let mut config = if path.exists() {
            Self::load_from_path(&path)?
        } else {
            Self::default()
        };
        if let Ok(base_url) = std::env::var("MOLTBOOK_BASE_URL") {
            if !base_url.is_empty() {
                config.api.base_url = base_url;
            }
        }
        Ok(config)
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MoltbookError::Config(format!("failed to parse {}: {e}", path.display())))
    }
}

/// Resolve the configuration file path following the XDG base directory
/// convention, honoring a `MOLTBOOK_CONFIG` override.
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("MOLTBOOK_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| MoltbookError::Config("cannot resolve config directory".to_string()))?;
    Ok(config_dir.join("moltbook").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_api() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://www.moltbook.com/api/v1");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.heartbeat.state_file, "memory/heartbeat-state.json");
    }

    #[test]
    fn loads_from_an_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[heartbeat]\nstate_file = \"/tmp/hb.json\"\n").unwrap();

        let config = Config::load_from_path(path.as_path()).unwrap();
        assert_eq!(config.heartbeat.state_file, "/tmp/hb.json");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080/api/v1"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.heartbeat.state_file, "memory/heartbeat-state.json");
    }
}
