//! Configuration for the projection explorer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{ExplorerError, Result};

/// Source column names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// ISO3 country code
    pub country: String,
    pub scenario: String,
    pub sex: String,
    pub age: String,
    pub year: String,
    /// Metric value (mean years of schooling)
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            country: "iso3".to_string(),
            scenario: "scenario".to_string(),
            sex: "sex".to_string(),
            age: "age".to_string(),
            year: "year".to_string(),
            value: "mys".to_string(),
        }
    }
}

impl ColumnNames {
    /// All configured names in schema order
    #[must_use]
    pub fn all(&self) -> [&str; 6] {
        [
            &self.country,
            &self.scenario,
            &self.sex,
            &self.age,
            &self.year,
            &self.value,
        ]
    }
}

/// Bounds of the interactive delta control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaControl {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for DeltaControl {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 5.0,
            step: 0.1,
            default: 0.0,
        }
    }
}

impl DeltaControl {
    /// Check that a value can be produced by this control
    pub fn validate(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ExplorerError::InvalidDelta {
                value,
                reason: "delta must be a finite number".to_string(),
            });
        }
        if value < self.min || value > self.max {
            return Err(ExplorerError::InvalidDelta {
                value,
                reason: format!("outside control range [{}, {}]", self.min, self.max),
            });
        }
        Ok(value)
    }

    /// Round a value to the nearest step, measured from `min`
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Strip accumulated binary noise such as 0.30000000000000004
        let scale = 1e9;
        ((snapped * scale).round() / scale).clamp(self.min, self.max)
    }

    fn check(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(ExplorerError::Config(
                "delta control bounds must be finite".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(ExplorerError::Config(format!(
                "delta min {} is greater than max {}",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(ExplorerError::Config(format!(
                "delta step must be positive, got {}",
                self.step
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(ExplorerError::Config(format!(
                "delta default {} is outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Configuration for the explorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Projection table (`.csv` or `.parquet`)
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    /// Sex value meaning "both sexes combined"
    pub sex_label: String,
    pub near_year: i64,
    pub far_year: i64,
    /// Display name of the target scenario, used in titles
    pub scenario_name: String,
    pub delta: DeltaControl,
    /// Rows per batch when reading CSV
    pub csv_batch_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("WD_MYS_Projections.csv"),
            columns: ColumnNames::default(),
            sex_label: "Both".to_string(),
            near_year: 2025,
            far_year: 2035,
            scenario_name: "SSP1".to_string(),
            delta: DeltaControl::default(),
            csv_batch_size: 8192,
        }
    }
}

impl ExplorerConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading explorer configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_years(mut self, near_year: i64, far_year: i64) -> Self {
        self.near_year = near_year;
        self.far_year = far_year;
        self
    }

    #[must_use]
    pub fn with_sex_label(mut self, sex_label: impl Into<String>) -> Self {
        self.sex_label = sex_label.into();
        self
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.near_year >= self.far_year {
            return Err(ExplorerError::Config(format!(
                "near year {} must be before far year {}",
                self.near_year, self.far_year
            )));
        }
        if let Some(name) = self.columns.all().iter().find(|name| name.trim().is_empty()) {
            return Err(ExplorerError::Config(format!(
                "column names must not be empty (got {name:?})"
            )));
        }
        if self.csv_batch_size == 0 {
            return Err(ExplorerError::Config(
                "csv batch size must be positive".to_string(),
            ));
        }
        self.delta.check()
    }
}
