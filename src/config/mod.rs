use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API server address
    #[serde(default = "default_address")]
    pub address: String,
    /// API server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9002
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// File holding every persisted collection
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Best-effort camera mirror served by the API
    #[serde(default = "default_mirror_file")]
    pub mirror_file: PathBuf,
    /// Storage quota used for the usage percentage, in megabytes
    #[serde(default = "default_quota_mb")]
    pub quota_mb: u64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("argus-data.json")
}

fn default_mirror_file() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_quota_mb() -> u64 {
    5 // conservative browser local storage limit
}

/// Recording capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingConfig {
    /// Interval between automated captures in seconds
    #[serde(default = "default_capture_interval")]
    pub capture_interval_secs: u64,
}

fn default_capture_interval() -> u64 {
    15 * 60
}

/// Security configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Password hashing cost (higher is more secure but slower)
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

fn default_password_hash_cost() -> u32 {
    10 // reasonable default for bcrypt
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            mirror_file: default_mirror_file(),
            quota_mb: default_quota_mb(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            capture_interval_secs: default_capture_interval(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl StoreConfig {
    pub fn quota_bytes(&self) -> u64 {
        self.quota_mb.saturating_mul(1024 * 1024)
    }
}

/// Load configuration from a file or use default
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;

            let config = if path.extension().map_or(false, |ext| ext == "json") {
                serde_json::from_str(&config_str).context("Failed to parse JSON config")?
            } else if path.extension().map_or(false, |ext| ext == "toml") {
                toml::from_str(&config_str).context("Failed to parse TOML config")?
            } else {
                return Err(anyhow::anyhow!("Unsupported config file format"));
            };

            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
