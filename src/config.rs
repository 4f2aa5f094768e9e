//! Dashboard configuration.
//! Reads a JSON file from `--config` or the path in the LAUNCH_DASH_CONFIG
//! env var; every field has a default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub dataset_path: PathBuf,
    /// Page heading and window title.
    pub title: String,
    pub slider: SliderConfig,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider: SliderConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

/// Payload range slider bounds. These are fixed widget bounds, the initial
/// selection always comes from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            marks: vec![
                SliderMark::new(0.0, "0 kg"),
                SliderMark::new(2_500.0, "2500"),
                SliderMark::new(5_000.0, "5000"),
                SliderMark::new(7_500.0, "7500"),
                SliderMark::new(10_000.0, "10000"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

impl SliderMark {
    pub fn new(value: f64, label: &str) -> Self {
        SliderMark {
            value,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl DashboardConfig {
    /// Use `explicit` if given, else the env var, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                log::info!("Using configuration {}", path.display());
                Self::load(&path)
            }
            None => {
                log::info!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SliderConfig { min, max, step, .. } = self.slider;
        if !(min <= max) {
            return Err(ConfigError::SliderBounds { min, max });
        }
        if !(step > 0.0) {
            return Err(ConfigError::SliderStep(step));
        }
        Ok(())
    }
}
