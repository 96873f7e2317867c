use lever_core::{
    KpiId, KpiModel, KpiResult, KpiValue, LeverCoefficients, LeverId, LeverInputs, ModelConfig,
    ModelError, ModelKind,
};
use tracing::debug;

/// Closed-form affine KPIs. Lever values are used as-is, not rescaled.
pub fn compute_kpis(c: &LeverCoefficients, inputs: &LeverInputs) -> KpiResult {
    let greening = inputs.get(LeverId::MaterialGreening);
    let energy = inputs.get(LeverId::EnergyOptimization);
    let takeback = inputs.get(LeverId::TakebackIncentives);
    let recycling = inputs.get(LeverId::RecyclingInvestment);
    let sourcing = inputs.get(LeverId::LocalSourcing);
    let marketing = inputs.get(LeverId::GreenMarketing);
    let pricing = inputs.get(LeverId::PricingLevel);
    let circular_rd = inputs.get(LeverId::CircularRd);

    let co2_emissions = c.co2_base
        * (1.0
            - c.co2_per_greening * greening
            - c.co2_per_energy * energy
            - c.co2_per_takeback * takeback
            - c.co2_per_recycling * recycling);
    let circularity_index = c.circularity_base
        + c.circularity_per_greening * greening
        + c.circularity_per_recycling * recycling
        + c.circularity_per_circular_rd * circular_rd;
    let sustainability_roi =
        c.roi_base - c.roi_per_efficiency_spend * (energy + recycling) + c.roi_per_marketing * marketing;
    let green_opex = c.opex_base + c.opex_per_green_spend * (energy + recycling + sourcing);
    let profit_margin = c.margin_base + c.margin_per_price_point * (pricing - c.reference_price)
        - c.margin_per_marketing * marketing;

    let mut result = KpiResult::new(ModelKind::Lever);
    for (kpi, value) in [
        (KpiId::Co2Emissions, co2_emissions),
        (KpiId::CircularityIndex, circularity_index),
        (KpiId::SustainabilityRoi, sustainability_roi),
        (KpiId::GreenOpex, green_opex),
        (KpiId::ProfitMargin, profit_margin),
    ] {
        result.insert(kpi, Ok(KpiValue::Scalar(value)));
    }
    result
}

/// Stateless lever-to-KPI model.
#[derive(Debug, Clone)]
pub struct LeverModel {
    cfg: ModelConfig,
}

impl LeverModel {
    pub fn new(cfg: ModelConfig) -> Self {
        Self { cfg }
    }
}

impl Default for LeverModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl KpiModel for LeverModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Lever
    }

    fn config(&self) -> &ModelConfig {
        &self.cfg
    }

    fn compute(&self, inputs: &LeverInputs) -> Result<KpiResult, ModelError> {
        let result = compute_kpis(&self.cfg.lever, inputs);
        debug!(?inputs, kpis = result.kpis.len(), "lever model evaluated");
        Ok(result)
    }
}
