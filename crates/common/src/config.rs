//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ShakeCursorError, ShakeCursorResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shake detection and magnification settings.
    pub shake: ShakeConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Shake gesture and magnification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Length of the trailing motion window in milliseconds.
    pub time_interval_ms: u64,

    /// Minimum path-length to bounding-diagonal ratio that counts as a shake.
    pub sensitivity: f64,

    /// Magnification applied on the first shake.
    pub magnification: f64,

    /// Extra magnification added by every further shake while magnified.
    pub over_magnification: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shakecursor_core=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            time_interval_ms: 1000,
            sensitivity: 4.0,
            magnification: 3.0,
            over_magnification: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ShakeConfig {
    /// Number of escalation steps the prepared cursor image stays sharp for.
    pub const SHARP_ESCALATIONS: f64 = 8.0;

    /// Motion window as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.time_interval_ms)
    }

    /// Pixel ratio the magnified cursor image should be rendered at.
    pub fn max_cursor_scale(&self) -> f64 {
        self.magnification + Self::SHARP_ESCALATIONS * self.over_magnification
    }

    /// Describe degenerate values. They are still applied as-is.
    pub fn check(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.sensitivity <= 0.0 {
            warnings.push(format!(
                "sensitivity {} is not positive; every large enough motion will count as a shake",
                self.sensitivity
            ));
        }
        if self.time_interval_ms == 0 {
            warnings.push(
                "time_interval_ms is 0; the motion window will never hold more than one sample"
                    .to_string(),
            );
        }
        if self.magnification < 1.0 {
            warnings.push(format!(
                "magnification {} is below 1.0; shaking will shrink the cursor",
                self.magnification
            ));
        }
        if self.over_magnification < 0.0 {
            warnings.push(format!(
                "over_magnification {} is negative; repeated shakes will shrink the cursor",
                self.over_magnification
            ));
        }
        warnings
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> ShakeCursorResult<Self> {
        if !path.exists() {
            return Err(ShakeCursorError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> ShakeCursorResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ShakeCursorResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("shakecursor").join("config.json")
}
