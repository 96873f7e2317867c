use crate::delta::{delta, Deltas};
use lever_core::{
    KpiError, KpiId, KpiModel, KpiResult, LeverInputs, ModelConfig, ModelError, ModelKind,
};
use lever_model::LeverModel;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trajectory_model::TrajectoryModel;

/// Selects the formula set named in configuration.
pub fn build_model(kind: ModelKind, cfg: ModelConfig) -> Box<dyn KpiModel> {
    match kind {
        ModelKind::Lever => Box::new(LeverModel::new(cfg)),
        ModelKind::Trajectory => Box::new(TrajectoryModel::new(cfg)),
    }
}

/// Baseline and scenario from the same model, plus their deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub model: ModelKind,
    pub inputs: LeverInputs,
    pub baseline: KpiResult,
    pub scenario: KpiResult,
    pub deltas: Deltas,
}

/// One table line. Failed cells stay `Err` so they can be shown as `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub kpi: KpiId,
    pub baseline: Result<f64, KpiError>,
    pub scenario: Result<f64, KpiError>,
    pub change_percent: Option<f64>,
}

impl Comparison {
    pub fn run(model: &dyn KpiModel, inputs: &LeverInputs) -> Result<Self, ModelError> {
        let baseline = model.baseline()?;
        let scenario = model.compute(inputs)?;
        let deltas = delta(&baseline, &scenario)?;
        debug!(
            model = %model.kind(),
            failed = deltas.values().filter(|d| d.is_err()).count(),
            "comparison computed"
        );
        Ok(Self {
            model: model.kind(),
            inputs: *inputs,
            baseline,
            scenario,
            deltas,
        })
    }

    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.model
            .kpis()
            .iter()
            .map(|&kpi| ComparisonRow {
                kpi,
                baseline: self.baseline.headline(kpi),
                scenario: self.scenario.headline(kpi),
                change_percent: self
                    .deltas
                    .get(&kpi)
                    .and_then(|d| d.as_ref().ok())
                    .and_then(|d| d.percent),
            })
            .collect()
    }
}
