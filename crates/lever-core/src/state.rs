use crate::lever::LEVER_COUNT;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub const STATE_DIM: usize = 9;

/// Named positions inside a [`StateVector`].
pub mod component {
    pub const EMISSIONS: usize = 0;
    pub const ENERGY_SPEND: usize = 1;
    pub const MATERIAL_WASTE: usize = 2;
    pub const RECYCLED_MATERIAL: usize = 3;
    pub const RECYCLED_REVENUE: usize = 4;
    pub const UNIT_COST_DELTA: usize = 5;
    pub const MARKETING_REACH: usize = 6;
    pub const REVENUE: usize = 7;
    pub const COST_BASE: usize = 8;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector(pub [f64; STATE_DIM]);

impl StateVector {
    pub fn initial() -> Self {
        Self([
            20_000.0,
            50_000.0,
            100.0,
            10.0,
            1_000.0,
            5.0,
            50.0,
            10_000_000.0,
            2_000_000.0,
        ])
    }

    /// Componentwise sum, the only way a state advances.
    pub fn advanced_by(&self, step: &[f64; STATE_DIM]) -> Self {
        let mut next = self.0;
        for (x, dx) in next.iter_mut().zip(step) {
            *x += dx;
        }
        Self(next)
    }

    pub fn as_array(&self) -> &[f64; STATE_DIM] {
        &self.0
    }
}

impl Index<usize> for StateVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Marginal effect of each normalized lever (column) on each state
/// component (row).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectMatrix(pub [[f64; LEVER_COUNT]; STATE_DIM]);

impl EffectMatrix {
    pub fn standard() -> Self {
        Self([
            [-300.0, -1000.0, 0.0, -200.0, 0.0, 0.0, 0.0, 0.0],
            [-500.0, -3000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [-50.0, 0.0, 0.0, -300.0, 0.0, 0.0, 0.0, 0.0],
            [20.0, 0.0, 0.0, 200.0, 0.0, 0.0, 0.0, 200.0],
            [0.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 0.0, 0.0],
            [50_000.0, 10_000.0, 5_000.0, 2_000.0, 2_000.0, 15_000.0, 100_000.0, 25_000.0],
            [10_000.0, 30_000.0, 5_000.0, 5_000.0, 0.0, 4_000.0, 20_000.0, 15_000.0],
        ])
    }

    /// `B · u`
    pub fn apply(&self, controls: &[f64; LEVER_COUNT]) -> [f64; STATE_DIM] {
        let mut out = [0.0; STATE_DIM];
        for (row, acc) in self.0.iter().zip(out.iter_mut()) {
            *acc = row.iter().zip(controls).map(|(b, u)| b * u).sum();
        }
        out
    }
}
