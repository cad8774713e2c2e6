//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use crate::render::{Dashboard, MapLayer};

fn mean(layer: &MapLayer) -> Option<f64> {
    if layer.points.is_empty() {
        return None;
    }
    let total: f64 = layer.points.iter().map(|p| p.value).sum();
    Some(total / layer.points.len() as f64)
}

fn format_mean(layer: &MapLayer) -> String {
    mean(layer).map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"))
}

/// Print summary information about a rendered dashboard
pub fn print_dashboard_summary(dashboard: &Dashboard) {
    println!("{}", dashboard.heading);
    println!(
        "  Scenario: {} | Age group: {} | Sex: {}",
        dashboard.scenario, dashboard.age_group, dashboard.sex
    );
    println!(
        "  Delta: {:+.1} | Countries: {}",
        dashboard.delta,
        dashboard.baseline.points.len()
    );
    for layer in [&dashboard.baseline, &dashboard.simulated, &dashboard.difference] {
        let range = layer
            .color_range
            .map_or_else(|| "auto".to_string(), |r| format!("[{:.2}, {:.2}]", r.min, r.max));
        println!("  - {} | mean {} | range {}", layer.title, format_mean(layer), range);
    }
}
