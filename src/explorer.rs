//! Interactive explorer session
//!
//! Holds the cached projection data and turns each delta from the control
//! surface into a dashboard. Only the adjustment and the difference-map range
//! are recomputed per interaction.

use std::sync::Arc;

use log::debug;

use crate::algorithm::adjust::adjust;
use crate::algorithm::color::{ColorRange, baseline_color_range};
use crate::cache::SliceCache;
use crate::config::{DeltaControl, ExplorerConfig};
use crate::error::Result;
use crate::models::{AdjustedView, ProjectionData};
use crate::render::{Dashboard, build_dashboard};

/// One user's view over a projection source
#[derive(Debug, Clone)]
pub struct Explorer {
    data: Arc<ProjectionData>,
    control: DeltaControl,
    scenario_name: String,
}

impl Explorer {
    /// Open the configured source through `cache`
    pub fn open(config: &ExplorerConfig, cache: &SliceCache) -> Result<Self> {
        config.validate()?;
        let data = cache.get_or_load(config)?;
        Ok(Self::from_data(data, config))
    }

    /// Wrap already-built projection data
    #[must_use]
    pub fn from_data(data: Arc<ProjectionData>, config: &ExplorerConfig) -> Self {
        Self {
            data,
            control: config.delta,
            scenario_name: config.scenario_name.clone(),
        }
    }

    #[must_use]
    pub fn data(&self) -> &ProjectionData {
        &self.data
    }

    #[must_use]
    pub fn control(&self) -> &DeltaControl {
        &self.control
    }

    /// Color range shared by the baseline and simulated maps
    #[must_use]
    pub fn baseline_range(&self) -> Option<ColorRange> {
        baseline_color_range(&self.data.table)
    }

    /// Adjusted view for a delta accepted by the control
    pub fn adjusted(&self, delta: f64) -> Result<AdjustedView> {
        let delta = self.control.validate(delta)?;
        Ok(adjust(&self.data.table, delta))
    }

    /// Dashboard for a delta accepted by the control
    pub fn view(&self, delta: f64) -> Result<Dashboard> {
        let adjusted = self.adjusted(delta)?;
        debug!(
            "Rendering {} countries with delta {:+.1}",
            adjusted.len(),
            adjusted.delta
        );
        Ok(build_dashboard(&self.data, &adjusted, &self.scenario_name))
    }

    /// Dashboard for the control's default delta
    pub fn initial_view(&self) -> Result<Dashboard> {
        self.view(self.control.default)
    }
}
