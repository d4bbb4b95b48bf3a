use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    audio::types::AnalysisConfig,
    error::{ConfigError, Result},
    export::ExportFormat,
};

/// Main configuration for BeatMarker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Onset detection settings
    pub analysis: AnalysisConfig,

    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate().map_err(|details| ConfigError::InvalidValue {
            key: "analysis".to_string(),
            value: details,
        })?;
        self.export.validate()?;
        Ok(())
    }
}

/// Marker export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Formats to write, one file per entry
    pub formats: Vec<ExportFormat>,

    /// Directory the marker files are written into
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::PremiereCsv],
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<()> {
        if self.formats.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "export.formats".to_string(),
                value: "empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
