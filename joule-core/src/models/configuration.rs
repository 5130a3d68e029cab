//! Configuration data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    #[default]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Server bind address
    pub server_host: String,
    /// Server port number
    pub server_port: u16,
    /// Logging verbosity level
    pub log_level: LogLevel,
    /// Seed demo plans, accounts and readings at startup
    pub seed: bool,
    /// Number of generated readings per seeded meter
    pub readings_per_meter: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            log_level: LogLevel::Info,
            seed: true,
            readings_per_meter: 20,
        }
    }
}

impl Configuration {
    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Configuration = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Return default configuration if file doesn't exist
            Ok(Configuration::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
        Ok(config_dir.join("joule").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server_host.is_empty() {
            errors.push("server_host must not be empty".to_string());
        }

        // Validate port (u16 is already 0-65535, so only check minimum)
        if self.server_port < 1024 {
            errors.push(
                "server_port must be at least 1024 (privileged ports not allowed)".to_string(),
            );
        }

        if self.readings_per_meter == 0 {
            errors.push("readings_per_meter must be at least 1".to_string());
        }
        if self.readings_per_meter > 10_000 {
            errors.push("readings_per_meter cannot exceed 10000".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
