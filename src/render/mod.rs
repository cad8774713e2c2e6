//! Map payloads for the presentation layer
//!
//! The explorer stops at (country code, value, title, color range) tuples;
//! drawing the choropleths is up to whatever consumes the serialized
//! `Dashboard`.

use std::io::Write;

use serde::Serialize;

use crate::algorithm::color::{ColorRange, baseline_color_range, diverging_color_range};
use crate::error::Result;
use crate::models::{AdjustedView, ProjectionData};

/// Label of the schooling metric on the two level maps
pub const METRIC_LABEL: &str = "Mean Years of Schooling";

/// Continuous color scales understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    /// Sequential scale for level maps
    Viridis,
    /// Diverging scale for the difference map
    RdBu,
}

/// One country's value on a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub country_code: String,
    pub value: f64,
}

/// One choropleth map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub title: String,
    /// Legend label of the value
    pub value_label: String,
    pub color_scale: ColorScale,
    /// Fixed color range; `None` lets the renderer scale to the data
    pub color_range: Option<ColorRange>,
    pub points: Vec<MapPoint>,
}

impl MapLayer {
    fn new(
        title: String,
        value_label: &str,
        color_scale: ColorScale,
        color_range: Option<ColorRange>,
        points: Vec<MapPoint>,
    ) -> Self {
        Self {
            title,
            value_label: value_label.to_string(),
            color_scale,
            color_range,
            points,
        }
    }
}

/// Everything one render of the explorer shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub heading: String,
    /// Scenario display name
    pub scenario: String,
    /// Age group as found in the data
    pub age_group: String,
    pub sex: String,
    pub delta: f64,
    pub baseline: MapLayer,
    pub simulated: MapLayer,
    pub difference: MapLayer,
}

/// Assemble the three map layers for an adjusted view
///
/// The baseline and simulated maps share the range of the unadjusted data;
/// the difference map is scaled symmetrically around zero.
#[must_use]
pub fn build_dashboard(
    data: &ProjectionData,
    view: &AdjustedView,
    scenario_name: &str,
) -> Dashboard {
    let near = view.near_year;
    let far = view.far_year;
    let shared_range = baseline_color_range(&data.table);
    let points = |value: fn(&crate::models::AdjustedRow) -> f64| -> Vec<MapPoint> {
        view.rows()
            .iter()
            .map(|row| MapPoint {
                country_code: row.country_code.clone(),
                value: value(row),
            })
            .collect()
    };

    let baseline = MapLayer::new(
        format!("{scenario_name} • Youth Mean Years of Schooling in {near} (Baseline)"),
        METRIC_LABEL,
        ColorScale::Viridis,
        shared_range,
        points(|row| row.near_value),
    );
    let simulated = MapLayer::new(
        format!(
            "{scenario_name} • Simulated Youth MYS in {far} (Baseline {:+.1} years)",
            view.delta
        ),
        METRIC_LABEL,
        ColorScale::Viridis,
        shared_range,
        points(|row| row.far_value_sim),
    );
    let difference = MapLayer::new(
        format!(
            "Change in Youth Mean Years of Schooling (Simulated {far} − {near}, {scenario_name})"
        ),
        &format!("Δ MYS ({far}_sim − {near})"),
        ColorScale::RdBu,
        diverging_color_range(view.delta_metric()),
        points(|row| row.delta_metric),
    );

    Dashboard {
        heading: format!("Youth Education Simulation • {scenario_name} {near} → {far}"),
        scenario: scenario_name.to_string(),
        age_group: data.labels.age_group.to_string(),
        sex: data.sex_label.clone(),
        delta: view.delta,
        baseline,
        simulated,
        difference,
    }
}

/// Write dashboards as pretty-printed JSON
///
/// A single dashboard is written as an object, several as an array.
pub fn write_dashboard_json<W: Write>(dashboards: &[Dashboard], mut writer: W) -> Result<()> {
    match dashboards {
        [single] => serde_json::to_writer_pretty(&mut writer, single)?,
        many => serde_json::to_writer_pretty(&mut writer, many)?,
    }
    writeln!(writer)?;
    Ok(())
}
