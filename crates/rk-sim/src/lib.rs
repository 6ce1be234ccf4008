//! Fixed-step RK4 integration of first-order ODE systems.
//!
//! Provides:
//! - `OdeSystem` trait for pluggable right-hand sides (closures included)
//! - Classical RK4 stepper
//! - `Integrator` driver with validated configuration and run status
//! - `Trajectory` time series
//! - SIR epidemic model as an example system

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod sir;
pub mod trajectory;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::RK4;
pub use model::OdeSystem;
pub use sim::{
    DEFAULT_FINAL_TIME, DEFAULT_STEP, InitialStatePolicy, Integrator, MAX_STEPS, RunStatus,
    SolveProgress, SolveStats,
};
pub use sir::SirModel;
pub use trajectory::Trajectory;
