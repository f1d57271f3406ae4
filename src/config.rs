use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::core::filters::DEFAULT_THRESHOLD_KM;
use crate::models::ReferencePoint;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub reference: ReferenceSettings,
    #[validate(nested)]
    pub filter: FilterSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReferenceSettings {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<&ReferenceSettings> for ReferencePoint {
    fn from(settings: &ReferenceSettings) -> Self {
        ReferencePoint::new(settings.latitude, settings.longitude)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FilterSettings {
    #[validate(range(exclusive_min = 0.0))]
    pub threshold_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration
    ///
    /// Built-in defaults are overridden by the file at `path`, when given.
    /// The format is picked from the file extension (e.g. `.toml`).
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("reference.latitude", ReferencePoint::DEFAULT_LATITUDE)?
            .set_default("reference.longitude", ReferencePoint::DEFAULT_LONGITUDE)?
            .set_default("filter.threshold_km", DEFAULT_THRESHOLD_KM)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::from(&self.reference)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference: ReferenceSettings {
                latitude: ReferencePoint::DEFAULT_LATITUDE,
                longitude: ReferencePoint::DEFAULT_LONGITUDE,
            },
            filter: FilterSettings {
                threshold_km: DEFAULT_THRESHOLD_KM,
            },
            logging: LoggingSettings {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
