use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::kpi::{KpiResult, ModelKind};
use crate::lever::LeverInputs;

/// Common capability of every formula set.
pub trait KpiModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    fn config(&self) -> &ModelConfig;

    fn compute(&self, inputs: &LeverInputs) -> Result<KpiResult, ModelError>;

    /// Same model applied to the configured reference levers.
    fn baseline(&self) -> Result<KpiResult, ModelError> {
        let baseline = self.config().baseline;
        self.compute(&baseline)
    }
}
