use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{DEFAULT_HERO_THRESHOLD_Y, DEFAULT_SIBLING_WINDOW};
use crate::detect::DEFAULT_ACCEPTANCE_THRESHOLD;
use crate::error::{D2cError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub detection: DetectionConfig,
    pub animation: AnimationConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Lab distance below which a match counts as exact.
    pub exact_threshold: f32,
    /// Lab distance above which a color falls back to an arbitrary value.
    pub approximate_threshold: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 3.0,
            approximate_threshold: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub acceptance_threshold: u8,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub hero_threshold_y: f32,
    pub sibling_window: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hero_threshold_y: DEFAULT_HERO_THRESHOLD_Y,
            sibling_window: DEFAULT_SIBLING_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
    pub clear_color_cache_per_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
            clear_color_cache_per_run: true,
        }
    }
}

impl Config {
    /// `~/.config/d2c/config.toml`, when a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("d2c").join("config.toml"))
    }

    /// Load from an explicit path, else the central config if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| D2cError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let colors = &self.colors;
        if !(colors.exact_threshold > 0.0) || !(colors.approximate_threshold > 0.0) {
            return Err(D2cError::Config(
                "color thresholds must be positive".to_string(),
            ));
        }
        if colors.exact_threshold > colors.approximate_threshold {
            return Err(D2cError::Config(format!(
                "colors.exact_threshold ({}) exceeds colors.approximate_threshold ({})",
                colors.exact_threshold, colors.approximate_threshold
            )));
        }
        if self.detection.acceptance_threshold == 0 || self.detection.acceptance_threshold > 100 {
            return Err(D2cError::Config(format!(
                "detection.acceptance_threshold must be within 1..=100, got {}",
                self.detection.acceptance_threshold
            )));
        }
        if !self.animation.hero_threshold_y.is_finite() || self.animation.sibling_window < 0.0 {
            return Err(D2cError::Config(
                "animation.hero_threshold_y must be finite and sibling_window non-negative"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
