//! Configuration management for Ember CLI
//!
//! Stores the interpreter URL and session defaults in
//! ~/.config/ember/config.toml. `EMBER_BASE_URL` (also read from `.env`)
//! overrides the stored URL.

use anyhow::{Context, Result};
use ember::{CommandMode, MatchMode, Position, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR: &str = "ember";
const CONFIG_FILE: &str = "config.toml";
const BASE_URL_ENV: &str = "EMBER_BASE_URL";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub mode: CommandMode,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Exchanges kept in the command history; 0 keeps everything
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_listen_window_secs")]
    pub listen_window_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_history_limit() -> usize {
    ember::DEFAULT_MAX_EXCHANGES
}

fn default_listen_window_secs() -> u64 {
    ember::DEFAULT_LISTEN_WINDOW.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mode: CommandMode::default(),
            match_mode: MatchMode::default(),
            history_limit: default_history_limit(),
            listen_window_secs: default_listen_window_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        dotenvy::dotenv().ok();
        config.apply_env(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    fn apply_env(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Using {} from environment", BASE_URL_ENV);
            self.base_url = url;
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set the interpreter URL
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    /// Session settings derived from this config
    pub fn session_config(&self, mode: Option<CommandMode>) -> SessionConfig {
        SessionConfig {
            mode: mode.unwrap_or(self.mode),
            match_mode: self.match_mode,
            history_limit: (self.history_limit > 0).then_some(self.history_limit),
            listen_window: Duration::from_secs(self.listen_window_secs),
            origin: Position::default(),
        }
    }
}
