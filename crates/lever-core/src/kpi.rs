use crate::error::{KpiError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KpiId {
    Co2Emissions,
    CircularityIndex,
    SustainabilityRoi,
    GreenOpex,
    ProfitMargin,
    EmissionsPerUnit,
    EnergyCostPerUnit,
}

impl KpiId {
    pub const ALL: [KpiId; 7] = [
        KpiId::Co2Emissions,
        KpiId::CircularityIndex,
        KpiId::SustainabilityRoi,
        KpiId::GreenOpex,
        KpiId::ProfitMargin,
        KpiId::EmissionsPerUnit,
        KpiId::EnergyCostPerUnit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KpiId::Co2Emissions => "co2_emissions",
            KpiId::CircularityIndex => "circularity_index",
            KpiId::SustainabilityRoi => "sustainability_roi",
            KpiId::GreenOpex => "green_opex",
            KpiId::ProfitMargin => "profit_margin",
            KpiId::EmissionsPerUnit => "emissions_per_unit",
            KpiId::EnergyCostPerUnit => "energy_cost_per_unit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KpiId::Co2Emissions => "CO₂ Emissions",
            KpiId::CircularityIndex => "Circularity Index",
            KpiId::SustainabilityRoi => "Sustainability ROI",
            KpiId::GreenOpex => "Green OPEX",
            KpiId::ProfitMargin => "Profit Margin",
            KpiId::EmissionsPerUnit => "Emissions per Unit",
            KpiId::EnergyCostPerUnit => "Energy Cost per Unit",
        }
    }

    /// Direction of improvement, used to flag adverse movements.
    pub fn higher_is_better(self) -> bool {
        matches!(
            self,
            KpiId::CircularityIndex | KpiId::SustainabilityRoi | KpiId::ProfitMargin
        )
    }
}

impl fmt::Display for KpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KpiId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        KpiId::ALL
            .into_iter()
            .find(|k| k.name() == trimmed)
            .ok_or_else(|| ValidationError::UnknownKpi(trimmed.to_string()))
    }
}

/// Which formula set produced a result. Same-named KPIs of different kinds
/// are not comparable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Lever,
    Trajectory,
}

impl ModelKind {
    /// KPIs produced by this kind, in display order.
    pub fn kpis(self) -> &'static [KpiId] {
        match self {
            ModelKind::Lever => &[
                KpiId::Co2Emissions,
                KpiId::CircularityIndex,
                KpiId::SustainabilityRoi,
                KpiId::GreenOpex,
                KpiId::ProfitMargin,
            ],
            ModelKind::Trajectory => &[
                KpiId::EmissionsPerUnit,
                KpiId::CircularityIndex,
                KpiId::EnergyCostPerUnit,
                KpiId::ProfitMargin,
                KpiId::SustainabilityRoi,
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Lever => "lever",
            ModelKind::Trajectory => "trajectory",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lever" => Ok(ModelKind::Lever),
            "trajectory" => Ok(ModelKind::Trajectory),
            other => Err(ValidationError::UnknownModel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Scalar(f64),
    /// One value per time step.
    Series(Vec<f64>),
}

impl KpiValue {
    /// The scalar itself, or the final step of a series.
    pub fn headline(&self) -> Option<f64> {
        match self {
            KpiValue::Scalar(v) => Some(*v),
            KpiValue::Series(values) => values.last().copied(),
        }
    }
}

pub type KpiOutcome = Result<KpiValue, KpiError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub model: ModelKind,
    pub kpis: BTreeMap<KpiId, KpiOutcome>,
}

impl KpiResult {
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            kpis: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kpi: KpiId, outcome: KpiOutcome) {
        self.kpis.insert(kpi, outcome);
    }

    pub fn get(&self, kpi: KpiId) -> Result<&KpiValue, KpiError> {
        match self.kpis.get(&kpi) {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(e.clone()),
            None => Err(KpiError::Unavailable { kpi }),
        }
    }

    pub fn headline(&self, kpi: KpiId) -> Result<f64, KpiError> {
        self.get(kpi)?
            .headline()
            .ok_or(KpiError::Unavailable { kpi })
    }

    pub fn series(&self, kpi: KpiId) -> Result<&[f64], KpiError> {
        match self.get(kpi)? {
            KpiValue::Series(values) => Ok(values),
            KpiValue::Scalar(_) => Err(KpiError::Unavailable { kpi }),
        }
    }

    /// Outcomes in the model's display order.
    pub fn iter(&self) -> impl Iterator<Item = (KpiId, &KpiOutcome)> + '_ {
        self.model
            .kpis()
            .iter()
            .filter_map(move |k| self.kpis.get(k).map(|o| (*k, o)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &KpiError> + '_ {
        self.kpis.values().filter_map(|o| o.as_ref().err())
    }
}
