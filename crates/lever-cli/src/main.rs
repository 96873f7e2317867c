//! lever-sim: run a sustainability lever scenario against its baseline.
//!
//! Usage:
//!   lever-sim [OPTIONS]
//!
//! Examples:
//!   # Slider defaults through the affine lever model
//!   lever-sim
//!
//!   # 12-month trajectory with two levers moved, exported to CSV
//!   lever-sim --model trajectory --set energy_optimization=60 --set pricing_level=110 --csv kpis.csv
//!
//!   # Show the lever ranges
//!   lever-sim --levers

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use kpi_compare::{build_model, save_comparison_csv, write_series_csv, Comparison, ScenarioReport};
use lever_core::{LeverId, LeverInputs, ModelConfig, ModelKind};
use prometheus_bridge::{reject_if_emissions_increase, KpiMetrics};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "lever-sim")]
#[command(about = "What-if impact of sustainability levers on environmental and financial KPIs")]
struct Cli {
    /// Formula set: `lever` (closed-form) or `trajectory` (time-stepped)
    #[arg(short, long, default_value = "lever")]
    model: ModelKind,

    /// JSON model configuration (baseline levers, coefficients, trajectory parameters)
    #[arg(short, long, value_name = "PATH", env = "LEVER_SIM_CONFIG")]
    config: Option<PathBuf>,

    /// JSON object with every lever value; slider defaults when omitted
    #[arg(short, long, value_name = "PATH")]
    inputs: Option<PathBuf>,

    /// Override one lever, e.g. `--set circular_rd=35` (repeatable)
    #[arg(short, long = "set", value_name = "LEVER=VALUE", value_parser = render::parse_assignment)]
    set: Vec<(LeverId, f64)>,

    /// Trajectory horizon in steps (overrides the configuration)
    #[arg(long)]
    horizon: Option<usize>,

    /// Write the KPI,Baseline,Scenario,Change table here
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write the per-step scenario series here (trajectory model only)
    #[arg(long, value_name = "PATH")]
    series_csv: Option<PathBuf>,

    /// Write a dated JSON report here
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Print the comparison in Prometheus text format
    #[arg(long)]
    metrics: bool,

    /// List the levers with their ranges and defaults, then exit
    #[arg(long)]
    levers: bool,
}

/// Flag combinations clap cannot express, checked before any output is written.
fn check_flags(cli: &Cli) -> anyhow::Result<()> {
    if cli.series_csv.is_some() && cli.model != ModelKind::Trajectory {
        bail!("--series-csv needs --model trajectory");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lever_sim=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if cli.levers {
        print!("{}", render::lever_table());
        return Ok(());
    }

    check_flags(&cli)?;

    let mut cfg = match &cli.config {
        Some(path) => ModelConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => ModelConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        cfg = cfg.with_horizon(horizon)?;
    }

    let mut inputs = match &cli.inputs {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<LeverInputs>(&raw)
                .with_context(|| format!("parsing lever inputs {}", path.display()))?
        }
        None => LeverInputs::slider_defaults(),
    };
    for (lever, value) in &cli.set {
        inputs = inputs.with(*lever, *value)?;
    }

    info!(model = %cli.model, "running scenario");
    let model = build_model(cli.model, cfg);
    let comparison = Comparison::run(model.as_ref(), &inputs)?;
    for failure in comparison.scenario.failures() {
        warn!(%failure, "KPI shown as N/A");
    }

    print!("{}", render::comparison_table(&comparison));

    if let Some(path) = &cli.csv {
        save_comparison_csv(&comparison, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "CSV exported");
    }

    if let Some(path) = &cli.series_csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_series_csv(&comparison.scenario, std::io::BufWriter::new(file))?;
        info!(path = %path.display(), "series exported");
    }

    if let Some(path) = &cli.report {
        ScenarioReport::from_comparison(&comparison)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if cli.metrics {
        let metrics = KpiMetrics::new()?;
        if reject_if_emissions_increase(&metrics, &comparison) {
            warn!("scenario emissions exceed the baseline");
        }
        print!("{}", metrics.encode_text()?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_csv_is_refused_for_the_lever_model() {
        let cli = Cli::try_parse_from(["lever-sim", "--series-csv", "series.csv"]).unwrap();
        assert!(check_flags(&cli).is_err());

        let cli = Cli::try_parse_from([
            "lever-sim",
            "--model",
            "trajectory",
            "--series-csv",
            "series.csv",
        ])
        .unwrap();
        assert!(check_flags(&cli).is_ok());
    }
}
