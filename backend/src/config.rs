//! # Server Configuration
//!
//! Settings for the `school-fees-server` binary, read from an optional YAML
//! file and then overridden by environment variables.
//!
//! ## YAML Format
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! storage: json
//! data_file: "/var/lib/school-fees/school_data.json"
//! log_level: "info"
//! ```
//!
//! ## Environment
//!
//! - `SCHOOL_FEES_CONFIG`: path of the YAML file (skipped when unset)
//! - `SCHOOL_FEES_BIND`: bind address
//! - `SCHOOL_FEES_DATA_FILE`: JSON document path
//! - `SCHOOL_FEES_STORAGE`: `json` or `memory`

use anyhow::{anyhow, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SCHOOL_FEES_CONFIG";
pub const BIND_ENV: &str = "SCHOOL_FEES_BIND";
pub const DATA_FILE_ENV: &str = "SCHOOL_FEES_DATA_FILE";
pub const STORAGE_ENV: &str = "SCHOOL_FEES_STORAGE";

/// Which document store backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown storage backend '{}', expected json or memory", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub storage: StorageBackend,
    /// JSON document path; the platform data directory is used when unset
    pub data_file: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            storage: StorageBackend::Json,
            data_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment variables
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_yaml_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(bind) = lookup(BIND_ENV) {
            config.bind_address = bind;
        }
        if let Some(data_file) = lookup(DATA_FILE_ENV) {
            config.data_file = Some(PathBuf::from(data_file));
        }
        if let Some(storage) = lookup(STORAGE_ENV) {
            config.storage = storage.parse()?;
        }

        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded server config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ServerConfig::load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.storage, StorageBackend::Json);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ServerConfig::from_yaml("storage: memory\n").unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_yaml_file_with_env_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("server.yaml");
        fs::write(
            &path,
            "bind_address: \"0.0.0.0:8080\"\nstorage: memory\nlog_level: debug\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let config = ServerConfig::load_with(lookup_from(&[
            (CONFIG_ENV, path.as_str()),
            (STORAGE_ENV, "JSON"),
            (DATA_FILE_ENV, "/tmp/fees.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.storage, StorageBackend::Json);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/fees.json")));
    }

    #[test]
    fn test_unknown_storage_backend() {
        let result = ServerConfig::load_with(lookup_from(&[(STORAGE_ENV, "sqlite")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = ServerConfig::load_with(lookup_from(&[(CONFIG_ENV, "/nonexistent/fees.yaml")]));
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
