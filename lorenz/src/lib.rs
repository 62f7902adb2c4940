//! Numerical integration of the Lorenz attractor.
//!
//! A run takes immutable [`SystemParameters`], an initial [`State`] and a
//! [`GridSpec`] and yields a [`Trajectory`]: one `x, y, z, t` row per grid time. Two
//! runs can be combined into a labeled [`MultiTrajectoryOverlay`] for
//! side-by-side rendering.

pub mod config;
pub mod errors;
pub mod field;
pub mod overlay;
pub mod parameters;
pub mod simulation;
pub mod state;
pub mod trajectory;

pub use config::SimulationConfig;
pub use errors::LorenzErrors;
pub use field::{LorenzField, field};
pub use lorenz_diffeq::{Solver, stepping::SolveBudget};
pub use overlay::{MultiTrajectoryOverlay, SystemLabel, compare};
pub use parameters::{RangePolicy, SystemParameters};
pub use simulation::{GridSpec, Simulation, integrate, simulate};
pub use state::State;
pub use trajectory::{COLUMNS, Sample, Trajectory};
