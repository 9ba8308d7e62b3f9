// src/config.rs
//! Configuration management with platform-specific storage

use crate::{
    area::{PolygonAreaEstimator, RingClosure, VertexValidation},
    error::{Result, SurveyError},
    geo::Projection,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILTER: &str = "survey_area=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub closure: RingClosure,
    pub projection: Projection,
    pub validation: VertexValidation,
    pub log_filter: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl EstimatorConfig {
    /// Default configuration: closed rings, standard Web Mercator
    pub fn platform_default() -> Self {
        Self {
            closure: RingClosure::Closed,
            projection: Projection::WebMercator,
            validation: VertexValidation::Lenient,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::get_config_path()?)
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::get_config_path()?)
    }

    /// Load from a config file, falling back to defaults when it does not exist
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::platform_default());
        }

        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| SurveyError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| SurveyError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SurveyError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SurveyError::Other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)
            .map_err(|e| SurveyError::Other(format!("Failed to write config file: {}", e)))?;

        tracing::debug!(path = %config_path.display(), "Configuration saved");
        Ok(())
    }

    /// Get config file path for Unix systems
    #[cfg(not(windows))]
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| SurveyError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("survey-area").join("config.json"))
    }

    /// Get config file path under the roaming application data folder
    #[cfg(windows)]
    pub fn get_config_path() -> Result<PathBuf> {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| SurveyError::Other("APPDATA environment variable not set".to_string()))?;

        Ok(PathBuf::from(appdata).join("survey-area").join("config.json"))
    }

    /// Estimator configured from these settings
    pub fn estimator(&self) -> PolygonAreaEstimator {
        PolygonAreaEstimator::new(self.closure, self.projection, self.validation)
    }

    pub fn update_closure(&mut self, closure: RingClosure) {
        self.closure = closure;
    }

    pub fn update_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn update_validation(&mut self, validation: VertexValidation) {
        self.validation = validation;
    }

    /// Switch to the exact behaviour of the Android survey app
    pub fn update_source_compatible(&mut self) {
        let estimator = PolygonAreaEstimator::source_compatible();
        self.closure = estimator.closure;
        self.projection = estimator.projection;
        self.validation = estimator.validation;
    }
}
