pub mod simulate;

pub use simulate::{derive_kpis, simulate, simulate_controls, Trajectory, TrajectoryModel};
