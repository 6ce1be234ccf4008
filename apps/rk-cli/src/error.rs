//! Error type for the command-line driver.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read scenario file: {path}")]
    ScenarioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario {path}: {source}")]
    ScenarioParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Simulation error: {0}")]
    Simulation(#[from] rk_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] rk_results::ResultsError),
}

pub type CliResult<T> = Result<T, CliError>;
