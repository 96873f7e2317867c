use lever_core::{KpiError, KpiId, KpiResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiDelta {
    pub baseline: f64,
    pub scenario: f64,
    /// `scenario - baseline`
    pub absolute: f64,
    /// Change relative to `|baseline|`, in percent. `None` when the baseline
    /// is exactly zero.
    pub percent: Option<f64>,
}

impl KpiDelta {
    pub fn between(baseline: f64, scenario: f64) -> Self {
        // `+ 0.0` folds a negative zero into positive zero
        let absolute = (scenario - baseline) + 0.0;
        let percent = if baseline == 0.0 {
            None
        } else {
            Some(absolute / baseline.abs() * 100.0 + 0.0)
        };
        Self {
            baseline,
            scenario,
            absolute,
            percent,
        }
    }
}

pub type DeltaOutcome = Result<KpiDelta, KpiError>;
pub type Deltas = BTreeMap<KpiId, DeltaOutcome>;

/// Headline deltas for every KPI of the baseline's model. A KPI that failed on
/// either side carries that failure.
pub fn delta(baseline: &KpiResult, scenario: &KpiResult) -> Result<Deltas, ValidationError> {
    if baseline.model != scenario.model {
        return Err(ValidationError::ModelMismatch {
            baseline: baseline.model,
            scenario: scenario.model,
        });
    }
    let mut out = Deltas::new();
    for &kpi in baseline.model.kpis() {
        let outcome = baseline
            .headline(kpi)
            .and_then(|b| scenario.headline(kpi).map(|s| KpiDelta::between(b, s)));
        out.insert(kpi, outcome);
    }
    Ok(out)
}

/// Per-step `scenario - baseline` for a time-series KPI. Series of unequal
/// length are compared over the common prefix.
pub fn series_delta(
    kpi: KpiId,
    baseline: &KpiResult,
    scenario: &KpiResult,
) -> Result<Vec<f64>, KpiError> {
    let b = baseline.series(kpi)?;
    let s = scenario.series(kpi)?;
    Ok(b.iter().zip(s).map(|(b, s)| (s - b) + 0.0).collect())
}
