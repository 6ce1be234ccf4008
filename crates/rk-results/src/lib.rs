//! rk-results: trajectory export and run storage.

pub mod console;
pub mod csv;
pub mod hash;
pub mod store;
pub mod types;

pub use console::{export_banner, render_table};
pub use csv::{export_csv, export_csv_file, parse_csv, to_csv_string, write_csv};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run was not solved, refusing to export: {reason}")]
    RunNotSolved { reason: String },

    #[error("Trajectory has no samples")]
    EmptyTrajectory,

    #[error("Malformed CSV at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },
}

/// Fail unless the integrator's last run completed.
pub(crate) fn require_solved(integrator: &rk_sim::Integrator) -> ResultsResult<&rk_sim::Trajectory> {
    match (integrator.status(), integrator.trajectory()) {
        (rk_sim::RunStatus::Solved, Some(traj)) => Ok(traj),
        (rk_sim::RunStatus::Failed(e), _) => Err(ResultsError::RunNotSolved {
            reason: e.to_string(),
        }),
        _ => Err(ResultsError::RunNotSolved {
            reason: "solve has not been run since the last configuration change".to_string(),
        }),
    }
}
