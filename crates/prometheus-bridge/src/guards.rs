use crate::KpiMetrics;
use kpi_compare::Comparison;
use lever_core::{KpiId, ModelKind};

/// KPIs whose scenario value moved against their direction of improvement.
pub fn adverse_movements(comparison: &Comparison) -> Vec<KpiId> {
    comparison
        .deltas
        .iter()
        .filter_map(|(kpi, d)| {
            let d = d.as_ref().ok()?;
            let worse = if kpi.higher_is_better() {
                d.absolute < 0.0
            } else {
                d.absolute > 0.0
            };
            worse.then_some(*kpi)
        })
        .collect()
}

pub fn reject_if_emissions_increase(metrics: &KpiMetrics, comparison: &Comparison) -> bool {
    metrics.observe(comparison);
    let emissions = match comparison.model {
        ModelKind::Lever => KpiId::Co2Emissions,
        ModelKind::Trajectory => KpiId::EmissionsPerUnit,
    };
    adverse_movements(comparison).contains(&emissions)
}
