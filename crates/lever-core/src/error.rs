use crate::kpi::{KpiId, ModelKind};
use crate::lever::LeverId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed input, rejected before any KPI is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("lever `{0}` is missing")]
    MissingLever(LeverId),
    #[error("unknown lever `{0}`")]
    UnknownLever(String),
    #[error("lever `{lever}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        lever: LeverId,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("lever `{0}` is not a finite number")]
    NonFinite(LeverId),
    #[error("model parameter `{0}` is not a finite number")]
    NonFiniteParameter(String),
    #[error("horizon must be at least 1 step, got {0}")]
    InvalidHorizon(usize),
    #[error("cannot compare a {baseline} result with a {scenario} result")]
    ModelMismatch {
        baseline: ModelKind,
        scenario: ModelKind,
    },
    #[error("unknown model kind `{0}`")]
    UnknownModel(String),
    #[error("unknown KPI `{0}`")]
    UnknownKpi(String),
}

/// Failure of a single KPI. Other KPIs of the same run are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum KpiError {
    #[error("{kpi}: denominator is zero at step {step}")]
    DivisionByZero { kpi: KpiId, step: usize },
    #[error("{kpi}: not produced by this model")]
    Unavailable { kpi: KpiId },
}

/// Whole-run failure of a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
