//! Configuration
//!
//! Read from `$LABCTL_CONFIG` or `<config_dir>/labctl/config.toml`. A
//! missing file means defaults; a malformed one is an error.

use crate::datasets::DataSource;
use crate::error::Result;
use crate::script::clamp_pace;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Directory or http(s) base URL holding the four dataset files
    pub data_source: String,

    /// Multiplier on every scripted delay (0 = instant)
    pub pace: f64,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            data_source: "data".to_string(),
            pace: 1.0,
            log_level: "info".to_string(),
        }
    }
}

impl LabConfig {
    /// Load from the discovered path, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        config.pace = clamp_pace(config.pace);
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LABCTL_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("labctl").join("config.toml"))
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data_source)
    }

    /// Apply command-line overrides on top of the file
    pub fn with_overrides(
        mut self,
        data: Option<String>,
        pace: Option<f64>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(data) = data {
            self.data_source = data;
        }
        if let Some(pace) = pace {
            self.pace = clamp_pace(pace);
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}
