// File: ./src/config.rs
// Handles configuration loading and defaults for the command-line tool.
use crate::context::AppContext;
use crate::extract::{ExtractMode, ExtractOptions, ModeKind};
use crate::model::DayRange;
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub mode: ModeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default)]
    pub valid_days: DayRange,
    #[serde(default)]
    pub labels: bool,
    #[serde(default = "default_true")]
    pub pretty: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeKind::Weekly,
            year: None,
            month: None,
            valid_days: DayRange::default(),
            labels: false,
            // Match the serde defaults
            pretty: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the context's config directory.
    /// A missing file is not an error: defaults apply.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Validates the settings and builds extraction options.
    pub fn to_options(&self) -> Result<ExtractOptions> {
        let days = DayRange::new(self.valid_days.start, self.valid_days.end).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid day range {}-{}: days must be within 1..31 and start <= end",
                self.valid_days.start,
                self.valid_days.end
            )
        })?;

        let mode = match self.mode {
            ModeKind::Weekly => ExtractMode::Weekly,
            ModeKind::Dated => {
                let year = self
                    .year
                    .ok_or_else(|| anyhow::anyhow!("Dated mode requires a year"))?;
                let month = self
                    .month
                    .ok_or_else(|| anyhow::anyhow!("Dated mode requires a month"))?;
                if !(1..=12).contains(&month) {
                    anyhow::bail!("Month out of range (1..12): {}", month);
                }
                ExtractMode::Dated { year, month }
            }
        };

        Ok(ExtractOptions {
            mode,
            valid_days: days,
            with_labels: self.labels,
        })
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", self.log_level))
    }
}
