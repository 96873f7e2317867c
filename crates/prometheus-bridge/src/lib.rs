pub mod guards;
pub mod metrics;

pub use guards::{adverse_movements, reject_if_emissions_increase};
pub use metrics::KpiMetrics;
