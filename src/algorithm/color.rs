//! Color-scale normalization for the map layers
//!
//! The baseline and simulated maps share one range computed from the
//! unadjusted near/far columns, so moving the delta never recolors the
//! baseline map. The difference map gets its own range, symmetric about
//! zero, recomputed per delta.

use serde::Serialize;

use crate::models::ResolvedSliceTable;

/// Closed value range mapped onto a color scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range covering every non-NaN value, or `None` if there is none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |range, v| match range {
                None => Some(Self::new(v, v)),
                Some(r) => Some(Self::new(r.min.min(v), r.max.max(v))),
            })
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Shared range of the near-year and far-year maps
///
/// Computed from the unadjusted columns only.
#[must_use]
pub fn baseline_color_range(table: &ResolvedSliceTable) -> Option<ColorRange> {
    ColorRange::from_values(table.near_values().chain(table.far_values()))
}

/// Range of the difference map: `[-m, m]` where `m` is the largest absolute value
///
/// An all-zero input yields `[-1, 1]` so the scale is never degenerate.
pub fn diverging_color_range(values: impl IntoIterator<Item = f64>) -> Option<ColorRange> {
    let range = ColorRange::from_values(values)?;
    let magnitude = range.min.abs().max(range.max.abs());
    if magnitude == 0.0 {
        return Some(ColorRange::new(-1.0, 1.0));
    }
    Some(ColorRange::new(-magnitude, magnitude))
}
