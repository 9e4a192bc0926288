use crate::error::{ReadzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_KEY: &str = "power-systems-chapters";
const DEFAULT_EXPORT_FILENAME: &str = "power-systems-reading-progress.json";
const DEFAULT_STATUS_TTL_MS: u64 = 2000;
const DEFAULT_WARNING_TTL_MS: u64 = 3000;
const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 300;

/// Keys accepted by `readz config`.
pub const CONFIG_KEYS: [&str; 5] = [
    "storage-key",
    "export-filename",
    "status-ttl-ms",
    "warning-ttl-ms",
    "save-debounce-ms",
];

/// Configuration for readz, stored in `{data_dir}/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadzConfig {
    /// Key the chapter list is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// File name offered by `export`
    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    /// Lifetime of info and success messages
    #[serde(default = "default_status_ttl_ms")]
    pub status_ttl_ms: u64,

    /// Lifetime of warnings
    #[serde(default = "default_warning_ttl_ms")]
    pub warning_ttl_ms: u64,

    /// Quiet period before the shell writes a pending snapshot
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

fn default_status_ttl_ms() -> u64 {
    DEFAULT_STATUS_TTL_MS
}

fn default_warning_ttl_ms() -> u64 {
    DEFAULT_WARNING_TTL_MS
}

fn default_save_debounce_ms() -> u64 {
    DEFAULT_SAVE_DEBOUNCE_MS
}

impl Default for ReadzConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            export_filename: default_export_filename(),
            status_ttl_ms: DEFAULT_STATUS_TTL_MS,
            warning_ttl_ms: DEFAULT_WARNING_TTL_MS,
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
        }
    }
}

impl ReadzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ReadzConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn warning_ttl(&self) -> Duration {
        Duration::from_millis(self.warning_ttl_ms)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "storage-key" => Ok(self.storage_key.clone()),
            "export-filename" => Ok(self.export_filename.clone()),
            "status-ttl-ms" => Ok(self.status_ttl_ms.to_string()),
            "warning-ttl-ms" => Ok(self.warning_ttl_ms.to_string()),
            "save-debounce-ms" => Ok(self.save_debounce_ms.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => self.storage_key = non_empty(key, value)?,
            "export-filename" => self.export_filename = non_empty(key, value)?,
            "status-ttl-ms" => self.status_ttl_ms = millis(key, value)?,
            "warning-ttl-ms" => self.warning_ttl_ms = millis(key, value)?,
            "save-debounce-ms" => self.save_debounce_ms = millis(key, value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ReadzError {
    ReadzError::Api(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ReadzError::Api(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn millis(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ReadzError::Api(format!("{} expects milliseconds, got {:?}", key, value)))
}
