use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NoesisConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub reasoning: ReasoningConfig,
    pub introspection: IntrospectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// `stdio` or `http`.
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReasoningConfig {
    pub max_forward_iterations: usize,
    pub max_backward_depth: usize,
    /// Keep facts derived during `reason()` for later calls.
    pub persist_facts: bool,
    /// Write each reasoning session to the memory store.
    pub record_sessions: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IntrospectionConfig {
    pub reflection_memory_limit: usize,
    pub history_limit: usize,
    pub support_memory_limit: usize,
    pub consistency_memory_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 7410,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_noesis_dir()
            .join("memory.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            max_forward_iterations: 100,
            max_backward_depth: 10,
            persist_facts: true,
            record_sessions: true,
        }
    }
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            reflection_memory_limit: 20,
            history_limit: 10,
            support_memory_limit: 10,
            consistency_memory_limit: 15,
        }
    }
}

/// Returns `~/.noesis/`, falling back to `./.noesis/` without a home directory.
pub fn default_noesis_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".noesis")
}

/// Returns the default config file path: `~/.noesis/config.toml`
pub fn default_config_path() -> PathBuf {
    default_noesis_dir().join("config.toml")
}

impl NoesisConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            NoesisConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (NOESIS_DB, NOESIS_LOG_LEVEL, NOESIS_TRANSPORT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NOESIS_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("NOESIS_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("NOESIS_TRANSPORT") {
            self.server.transport = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
