// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::model::quick_add::DateFormat;
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_FILENAME: &str = "config.toml";

fn default_upcoming_days() -> u32 {
    7
}

fn default_first_day_of_week() -> Weekday {
    Weekday::Mon
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Short-date interpretation for quick-add tokens like `!15.3`.
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default)]
    pub show_completed: bool,
    /// Window of the Upcoming view, in days.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,
    /// First column of calendar views.
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: Weekday,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            show_completed: false,
            upcoming_days: default_upcoming_days(),
            first_day_of_week: default_first_day_of_week(),
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults on a missing or corrupt
    /// file. Configuration problems never block startup.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings ({e:#}), using defaults");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        let path = AppPaths::get_config_dir()?.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_dir()?.join(CONFIG_FILENAME);
        let raw = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(&path, raw).with_context(|| format!("Failed to write config file: {:?}", path))
    }
}
