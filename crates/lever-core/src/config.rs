use crate::error::{ConfigError, ValidationError};
use crate::lever::LeverInputs;
use crate::state::{EffectMatrix, StateVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Constants of the closed-form lever formulas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeverCoefficients {
    pub co2_base: f64,
    pub co2_per_greening: f64,
    pub co2_per_energy: f64,
    pub co2_per_takeback: f64,
    pub co2_per_recycling: f64,
    pub circularity_base: f64,
    pub circularity_per_greening: f64,
    pub circularity_per_recycling: f64,
    pub circularity_per_circular_rd: f64,
    pub roi_base: f64,
    pub roi_per_efficiency_spend: f64,
    pub roi_per_marketing: f64,
    pub opex_base: f64,
    pub opex_per_green_spend: f64,
    pub margin_base: f64,
    pub margin_per_price_point: f64,
    pub margin_per_marketing: f64,
    /// Pricing level at which the margin equals `margin_base`.
    pub reference_price: f64,
}

impl Default for LeverCoefficients {
    fn default() -> Self {
        Self {
            co2_base: 21_300.0,
            co2_per_greening: 0.005,
            co2_per_energy: 0.006,
            co2_per_takeback: 0.004,
            co2_per_recycling: 0.003,
            circularity_base: 16.7,
            circularity_per_greening: 0.2,
            circularity_per_recycling: 0.15,
            circularity_per_circular_rd: 0.25,
            roi_base: 2.21,
            roi_per_efficiency_spend: 0.002,
            roi_per_marketing: 0.001,
            opex_base: 1.9,
            opex_per_green_spend: 0.005,
            margin_base: 0.18,
            margin_per_price_point: 0.0005,
            margin_per_marketing: 0.0004,
            reference_price: 100.0,
        }
    }
}

impl LeverCoefficients {
    fn ensure_finite(&self) -> Result<(), ValidationError> {
        let named = [
            ("co2_base", self.co2_base),
            ("co2_per_greening", self.co2_per_greening),
            ("co2_per_energy", self.co2_per_energy),
            ("co2_per_takeback", self.co2_per_takeback),
            ("co2_per_recycling", self.co2_per_recycling),
            ("circularity_base", self.circularity_base),
            ("circularity_per_greening", self.circularity_per_greening),
            ("circularity_per_recycling", self.circularity_per_recycling),
            ("circularity_per_circular_rd", self.circularity_per_circular_rd),
            ("roi_base", self.roi_base),
            ("roi_per_efficiency_spend", self.roi_per_efficiency_spend),
            ("roi_per_marketing", self.roi_per_marketing),
            ("opex_base", self.opex_base),
            ("opex_per_green_spend", self.opex_per_green_spend),
            ("margin_base", self.margin_base),
            ("margin_per_price_point", self.margin_per_price_point),
            ("margin_per_marketing", self.margin_per_marketing),
            ("reference_price", self.reference_price),
        ];
        match named.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(ValidationError::NonFiniteParameter(format!("lever.{name}"))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrajectoryParams {
    pub horizon: usize,
    pub initial_state: StateVector,
    pub effect_matrix: EffectMatrix,
    /// Share of energy spend attributed to unit cost.
    pub energy_price_factor: f64,
    /// Added to the ROI denominator so the first step is defined.
    pub roi_epsilon: f64,
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        Self {
            horizon: 12,
            initial_state: StateVector::initial(),
            effect_matrix: EffectMatrix::standard(),
            energy_price_factor: 0.2,
            roi_epsilon: 1e-3,
        }
    }
}

impl TrajectoryParams {
    fn ensure_finite(&self) -> Result<(), ValidationError> {
        let bad = |name: String| Err(ValidationError::NonFiniteParameter(name));
        if !self.energy_price_factor.is_finite() {
            return bad("trajectory.energy_price_factor".into());
        }
        if !self.roi_epsilon.is_finite() {
            return bad("trajectory.roi_epsilon".into());
        }
        if let Some(i) = self.initial_state.0.iter().position(|x| !x.is_finite()) {
            return bad(format!("trajectory.initial_state[{i}]"));
        }
        for (row, coefficients) in self.effect_matrix.0.iter().enumerate() {
            if let Some(col) = coefficients.iter().position(|b| !b.is_finite()) {
                return bad(format!("trajectory.effect_matrix[{row}][{col}]"));
            }
        }
        Ok(())
    }
}

/// Shared, immutable model configuration. Both models take it at
/// construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ModelConfig {
    pub baseline: LeverInputs,
    pub lever: LeverCoefficients,
    pub trajectory: TrajectoryParams,
}

impl ModelConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let cfg: ModelConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects a zero horizon and any NaN or infinite coefficient.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trajectory.horizon == 0 {
            return Err(ValidationError::InvalidHorizon(0));
        }
        self.lever.ensure_finite()?;
        self.trajectory.ensure_finite()
    }

    pub fn with_horizon(mut self, horizon: usize) -> Result<Self, ValidationError> {
        if horizon == 0 {
            return Err(ValidationError::InvalidHorizon(horizon));
        }
        self.trajectory.horizon = horizon;
        Ok(self)
    }
}
