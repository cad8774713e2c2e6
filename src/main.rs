use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use projection_explorer::utils::logging::print_dashboard_summary;
use projection_explorer::{Explorer, ExplorerConfig, global_cache, write_dashboard_json};

/// Explore a uniform adjustment of far-year education projections.
#[derive(Parser, Debug)]
#[command(name = "projection-explorer", version)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Projection table (.csv or .parquet)
    #[arg(long, env = "MYS_DATA_PATH")]
    data: Option<PathBuf>,

    /// Baseline year
    #[arg(long)]
    near_year: Option<i64>,

    /// Projected year
    #[arg(long)]
    far_year: Option<i64>,

    /// Sex value meaning both sexes combined
    #[arg(long)]
    sex: Option<String>,

    /// Adjustment of the far-year value, in years of schooling. Repeat to
    /// render several adjustments against the same loaded data.
    #[arg(long, allow_hyphen_values = true)]
    delta: Vec<f64>,

    /// Write the dashboard JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Round each delta to the control's step before rendering
    #[arg(long, default_value_t = false)]
    snap: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(ExplorerConfig, Vec<f64>, Option<PathBuf>, bool)> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => ExplorerConfig::default(),
        };
        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(year) = self.near_year {
            config.near_year = year;
        }
        if let Some(year) = self.far_year {
            config.far_year = year;
        }
        if let Some(sex) = self.sex {
            config.sex_label = sex;
        }
        Ok((config, self.delta, self.output, self.snap))
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, deltas, output, snap) = Args::parse().into_config()?;
    config.validate().context("invalid configuration")?;

    let start = Instant::now();
    let explorer = Explorer::open(&config, global_cache())
        .with_context(|| format!("preparing projections from {}", config.data_path.display()))?;
    info!(
        "Ready: {} countries, age group {}, in {:?}",
        explorer.data().table.len(),
        explorer.data().labels.age_group,
        start.elapsed()
    );

    let deltas = if deltas.is_empty() {
        vec![explorer.control().default]
    } else {
        deltas
    };

    let mut dashboards = Vec::with_capacity(deltas.len());
    for delta in deltas {
        let delta = if snap {
            explorer.control().snap(delta)
        } else {
            delta
        };
        let dashboard = explorer
            .view(delta)
            .with_context(|| format!("rendering delta {delta}"))?;
        // stdout carries the JSON when no output file is given
        if output.is_some() {
            print_dashboard_summary(&dashboard);
        }
        dashboards.push(dashboard);
    }

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_dashboard_json(&dashboards, BufWriter::new(file))?;
            info!("Wrote {} dashboard(s) to {}", dashboards.len(), path.display());
        }
        None => write_dashboard_json(&dashboards, io::stdout().lock())?,
    }

    Ok(())
}
