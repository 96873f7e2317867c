use lever_core::state::component::{
    COST_BASE, EMISSIONS, ENERGY_SPEND, MATERIAL_WASTE, RECYCLED_MATERIAL, REVENUE,
};
use lever_core::{
    KpiError, KpiId, KpiModel, KpiOutcome, KpiResult, KpiValue, LeverInputs, ModelConfig,
    ModelError, ModelKind, StateVector, TrajectoryParams, ValidationError, LEVER_COUNT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Full open-loop run: one state per step plus the derived KPI series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub states: Vec<StateVector>,
    pub kpis: KpiResult,
}

impl Trajectory {
    pub fn horizon(&self) -> usize {
        self.states.len()
    }

    /// `None` only for a hand-built trajectory with no states.
    pub fn final_state(&self) -> Option<&StateVector> {
        self.states.last()
    }
}

/// Runs the state update on lever inputs normalized to `[0, 1.5]`.
pub fn simulate(
    params: &TrajectoryParams,
    inputs: &LeverInputs,
    horizon: usize,
) -> Result<Trajectory, ValidationError> {
    simulate_controls(params, &inputs.normalized(), horizon)
}

/// `X[t] = X[t-1] + B·u` for `t` in `1..horizon`, with `u` held constant.
pub fn simulate_controls(
    params: &TrajectoryParams,
    controls: &[f64; LEVER_COUNT],
    horizon: usize,
) -> Result<Trajectory, ValidationError> {
    if horizon == 0 {
        return Err(ValidationError::InvalidHorizon(horizon));
    }
    let step = params.effect_matrix.apply(controls);

    let mut states = Vec::with_capacity(horizon);
    states.push(params.initial_state);
    for t in 1..horizon {
        let next = states[t - 1].advanced_by(&step);
        states.push(next);
    }

    let kpis = derive_kpis(params, &states);
    for failure in kpis.failures() {
        warn!(%failure, "trajectory KPI undefined");
    }
    debug!(horizon, "trajectory simulated");
    Ok(Trajectory { states, kpis })
}

fn ratio_series<F>(kpi: KpiId, states: &[StateVector], ratio: F) -> KpiOutcome
where
    F: Fn(&StateVector) -> (f64, f64),
{
    let mut values = Vec::with_capacity(states.len());
    for (step, x) in states.iter().enumerate() {
        let (numerator, denominator) = ratio(x);
        if denominator == 0.0 {
            return Err(KpiError::DivisionByZero { kpi, step });
        }
        values.push(numerator / denominator);
    }
    Ok(KpiValue::Series(values))
}

/// Per-step KPI ratios over a finished trajectory.
pub fn derive_kpis(params: &TrajectoryParams, states: &[StateVector]) -> KpiResult {
    let mut result = KpiResult::new(ModelKind::Trajectory);
    let Some(x0) = states.first().copied() else {
        return result;
    };

    result.insert(
        KpiId::EmissionsPerUnit,
        ratio_series(KpiId::EmissionsPerUnit, states, |x| (x[EMISSIONS], x[REVENUE])),
    );
    result.insert(
        KpiId::CircularityIndex,
        ratio_series(KpiId::CircularityIndex, states, |x| {
            (x[RECYCLED_MATERIAL], x[MATERIAL_WASTE] + x[RECYCLED_MATERIAL])
        }),
    );
    result.insert(
        KpiId::EnergyCostPerUnit,
        ratio_series(KpiId::EnergyCostPerUnit, states, |x| {
            (x[ENERGY_SPEND] * params.energy_price_factor, x[REVENUE])
        }),
    );
    result.insert(
        KpiId::ProfitMargin,
        ratio_series(KpiId::ProfitMargin, states, |x| {
            (x[REVENUE] - x[COST_BASE], x[REVENUE])
        }),
    );
    result.insert(
        KpiId::SustainabilityRoi,
        ratio_series(KpiId::SustainabilityRoi, states, |x| {
            (
                x0[EMISSIONS] - x[EMISSIONS],
                x[COST_BASE] - x0[COST_BASE] + params.roi_epsilon,
            )
        }),
    );
    result
}

#[derive(Debug, Clone)]
pub struct TrajectoryModel {
    cfg: ModelConfig,
}

impl TrajectoryModel {
    pub fn new(cfg: ModelConfig) -> Self {
        Self { cfg }
    }

    /// Run with the configured horizon.
    pub fn simulate(&self, inputs: &LeverInputs) -> Result<Trajectory, ValidationError> {
        simulate(&self.cfg.trajectory, inputs, self.cfg.trajectory.horizon)
    }

    pub fn simulate_with_horizon(
        &self,
        inputs: &LeverInputs,
        horizon: usize,
    ) -> Result<Trajectory, ValidationError> {
        simulate(&self.cfg.trajectory, inputs, horizon)
    }
}

impl Default for TrajectoryModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl KpiModel for TrajectoryModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Trajectory
    }

    fn config(&self) -> &ModelConfig {
        &self.cfg
    }

    fn compute(&self, inputs: &LeverInputs) -> Result<KpiResult, ModelError> {
        Ok(self.simulate(inputs)?.kpis)
    }
}
