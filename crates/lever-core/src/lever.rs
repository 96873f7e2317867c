use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const LEVER_COUNT: usize = 8;

/// The eight sustainability levers, in effect-matrix column order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeverId {
    MaterialGreening,
    EnergyOptimization,
    TakebackIncentives,
    RecyclingInvestment,
    LocalSourcing,
    GreenMarketing,
    PricingLevel,
    CircularRd,
}

impl LeverId {
    pub const ALL: [LeverId; LEVER_COUNT] = [
        LeverId::MaterialGreening,
        LeverId::EnergyOptimization,
        LeverId::TakebackIncentives,
        LeverId::RecyclingInvestment,
        LeverId::LocalSourcing,
        LeverId::GreenMarketing,
        LeverId::PricingLevel,
        LeverId::CircularRd,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LeverId::MaterialGreening => "material_greening",
            LeverId::EnergyOptimization => "energy_optimization",
            LeverId::TakebackIncentives => "takeback_incentives",
            LeverId::RecyclingInvestment => "recycling_investment",
            LeverId::LocalSourcing => "local_sourcing",
            LeverId::GreenMarketing => "green_marketing",
            LeverId::PricingLevel => "pricing_level",
            LeverId::CircularRd => "circular_rd",
        }
    }

    /// Slider caption.
    pub fn label(self) -> &'static str {
        match self {
            LeverId::MaterialGreening => "Material Greening (% budget)",
            LeverId::EnergyOptimization => "Energy Optimization",
            LeverId::TakebackIncentives => "Take-back Incentives",
            LeverId::RecyclingInvestment => "Recycling Investment",
            LeverId::LocalSourcing => "Local Sourcing (%)",
            LeverId::GreenMarketing => "Green Marketing",
            LeverId::PricingLevel => "Pricing Level",
            LeverId::CircularRd => "Circular R&D",
        }
    }

    /// Inclusive `(min, max)` slider range.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            LeverId::PricingLevel => (50.0, 150.0),
            _ => (0.0, 100.0),
        }
    }

    /// Initial slider position.
    pub fn slider_default(self) -> f64 {
        match self {
            LeverId::MaterialGreening => 20.0,
            LeverId::EnergyOptimization => 30.0,
            LeverId::TakebackIncentives => 10.0,
            LeverId::RecyclingInvestment => 15.0,
            LeverId::LocalSourcing => 40.0,
            LeverId::GreenMarketing => 25.0,
            LeverId::PricingLevel => 100.0,
            LeverId::CircularRd => 20.0,
        }
    }

    /// Reference setting: no policy effort, list price.
    pub fn baseline_value(self) -> f64 {
        match self {
            LeverId::PricingLevel => 100.0,
            _ => 0.0,
        }
    }

    pub fn check(self, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite(self));
        }
        let (min, max) = self.bounds();
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                lever: self,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

impl fmt::Display for LeverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeverId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LeverId::ALL
            .into_iter()
            .find(|l| l.name() == trimmed)
            .ok_or_else(|| ValidationError::UnknownLever(trimmed.to_string()))
    }
}

/// One value per lever, each inside its declared bounds.
///
/// Every constructor validates; a `LeverInputs` value that exists is complete
/// and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct LeverInputs {
    values: [f64; LEVER_COUNT],
}

impl LeverInputs {
    pub fn new(values: [f64; LEVER_COUNT]) -> Result<Self, ValidationError> {
        for lever in LeverId::ALL {
            lever.check(values[lever.index()])?;
        }
        Ok(Self { values })
    }

    pub fn baseline() -> Self {
        Self {
            values: LeverId::ALL.map(LeverId::baseline_value),
        }
    }

    pub fn slider_defaults() -> Self {
        Self {
            values: LeverId::ALL.map(LeverId::slider_default),
        }
    }

    pub fn from_map(map: &BTreeMap<LeverId, f64>) -> Result<Self, ValidationError> {
        let mut values = [0.0; LEVER_COUNT];
        for lever in LeverId::ALL {
            let value = map
                .get(&lever)
                .copied()
                .ok_or(ValidationError::MissingLever(lever))?;
            values[lever.index()] = value;
        }
        Self::new(values)
    }

    /// Builds inputs from `(name, value)` pairs. Every lever must appear.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (name, value) in pairs {
            map.insert(name.as_ref().parse::<LeverId>()?, value);
        }
        Self::from_map(&map)
    }

    pub fn get(&self, lever: LeverId) -> f64 {
        self.values[lever.index()]
    }

    /// Copy with one lever moved.
    pub fn with(&self, lever: LeverId, value: f64) -> Result<Self, ValidationError> {
        let mut next = *self;
        next.values[lever.index()] = lever.check(value)?;
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeverId, f64)> + '_ {
        LeverId::ALL.into_iter().map(move |l| (l, self.values[l.index()]))
    }

    pub fn as_array(&self) -> &[f64; LEVER_COUNT] {
        &self.values
    }

    /// Lever values divided by 100, so a 100% pricing level becomes 1.0.
    pub fn normalized(&self) -> [f64; LEVER_COUNT] {
        self.values.map(|v| v / 100.0)
    }
}

impl Default for LeverInputs {
    fn default() -> Self {
        Self::baseline()
    }
}

impl TryFrom<BTreeMap<String, f64>> for LeverInputs {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<LeverInputs> for BTreeMap<String, f64> {
    fn from(inputs: LeverInputs) -> Self {
        inputs
            .iter()
            .map(|(lever, value)| (lever.name().to_string(), value))
            .collect()
    }
}
