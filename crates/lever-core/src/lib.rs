pub mod config;
pub mod error;
pub mod format;
pub mod kpi;
pub mod lever;
pub mod model;
pub mod state;
#[cfg(test)]
mod tests;

pub use config::*;
pub use error::*;
pub use kpi::*;
pub use lever::*;
pub use model::*;
pub use state::{EffectMatrix, StateVector, STATE_DIM};
