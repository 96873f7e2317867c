use std::fmt::Write;

use kpi_compare::Comparison;
use lever_core::format::{display_value, signed_percent};
use lever_core::{LeverId, LeverInputs};

const NOT_AVAILABLE: &str = "N/A";

/// `--set` argument: `lever_name=value`, range-checked.
pub fn parse_assignment(raw: &str) -> Result<(LeverId, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LEVER=VALUE, got `{raw}`"))?;
    let lever: LeverId = name.parse().map_err(|e| format!("{e}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("{lever}: {e}"))?;
    lever.check(value).map_err(|e| e.to_string())?;
    Ok((lever, value))
}

pub fn lever_table() -> String {
    let defaults = LeverInputs::slider_defaults();
    let mut out = String::new();
    let _ = writeln!(out, "{:<22}{:<30}{:>6}{:>6}{:>9}", "LEVER", "LABEL", "MIN", "MAX", "DEFAULT");
    for lever in LeverId::ALL {
        let (min, max) = lever.bounds();
        let _ = writeln!(
            out,
            "{:<22}{:<30}{:>6}{:>6}{:>9}",
            lever.name(),
            lever.label(),
            min,
            max,
            defaults.get(lever)
        );
    }
    out
}

pub fn comparison_table(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "model: {}", comparison.model);
    let _ = writeln!(
        out,
        "{:<22}{:>20}{:>20}{:>10}",
        "KPI", "Baseline", "Scenario", "Change"
    );
    for row in comparison.rows() {
        let cell = |v: &Result<f64, lever_core::KpiError>| match v {
            Ok(v) => display_value(comparison.model, row.kpi, *v),
            Err(_) => NOT_AVAILABLE.to_string(),
        };
        let change = row
            .change_percent
            .map(signed_percent)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let _ = writeln!(
            out,
            "{:<22}{:>20}{:>20}{:>10}",
            row.kpi.label(),
            cell(&row.baseline),
            cell(&row.scenario),
            change
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpi_compare::build_model;
    use lever_core::{ModelConfig, ModelKind};

    #[test]
    fn assignments_are_range_checked() {
        assert_eq!(
            parse_assignment("energy_optimization=60"),
            Ok((LeverId::EnergyOptimization, 60.0))
        );
        assert_eq!(
            parse_assignment(" pricing_level = 75.5"),
            Ok((LeverId::PricingLevel, 75.5))
        );
        assert!(parse_assignment("pricing_level=10").is_err());
        assert!(parse_assignment("carbon_tax=10").is_err());
        assert!(parse_assignment("circular_rd").is_err());
        assert!(parse_assignment("circular_rd=lots").is_err());
    }

    #[test]
    fn lever_table_lists_every_lever() {
        let table = lever_table();
        assert_eq!(table.lines().count(), 1 + LeverId::ALL.len());
        assert!(table.contains("Circular R&D"));
    }

    #[test]
    fn trajectory_table_marks_undefined_change() {
        let model = build_model(ModelKind::Trajectory, ModelConfig::default());
        let comparison = Comparison::run(model.as_ref(), &LeverInputs::slider_defaults()).unwrap();
        let table = comparison_table(&comparison);
        let roi = table
            .lines()
            .find(|l| l.starts_with("Sustainability ROI"))
            .unwrap();
        assert!(roi.trim_end().ends_with("N/A"));
        assert!(table.contains("kg/unit"));
        assert!(table.contains("FCFA"));
    }
}
