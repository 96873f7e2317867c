pub mod formulas;

pub use formulas::{compute_kpis, LeverModel};
