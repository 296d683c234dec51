//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! progress-config.toml file. It configures the simulator's display
//! personality, the storage directory for persisted ranges, and which face
//! instance to run.

use crate::host::LcdType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from progress-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Display personality configuration
    pub display: DisplayConfig,
    /// Record storage configuration
    pub storage: StorageConfig,
    /// Face instance configuration
    pub face: FaceConfig,
}

/// Display personality configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Segment LCD personality: "custom" (true decimal point) or "classic"
    /// (colon stands in for the decimal point)
    pub lcd_type: String,
}

impl DisplayConfig {
    /// Resolve the configured personality; unknown values fall back to custom
    pub fn personality(&self) -> LcdType {
        if self.lcd_type.eq_ignore_ascii_case("classic") {
            LcdType::Classic
        } else {
            LcdType::Custom
        }
    }
}

/// Record storage configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the per-instance range records
    pub data_dir: String,
}

/// Face instance configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct FaceConfig {
    /// Instance index keying this face's persisted record
    pub instance_index: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: DisplayConfig {
                lcd_type: "custom".to_string(),
            },
            storage: StorageConfig {
                data_dir: ".progress-face".to_string(),
            },
            face: FaceConfig { instance_index: 0 },
        }
    }
}

impl Config {
    /// Load configuration from progress-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("progress-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to progress-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("progress-config.toml", contents)?;
        Ok(())
    }
}
