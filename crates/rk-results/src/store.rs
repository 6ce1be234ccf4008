//! Run storage API.
//!
//! Each run lives in `<root>/<run_id>/` as `manifest.json` plus
//! `trajectory.csv`.

use std::fs;
use std::path::PathBuf;

use rk_sim::{Integrator, Trajectory};
use tracing::info;

use crate::csv::{parse_csv, to_csv_string};
use crate::hash::compute_run_id;
use crate::types::{ModelDef, RunConfig, RunManifest};
use crate::{ResultsError, ResultsResult, require_solved};

const MANIFEST_FILE: &str = "manifest.json";
const TRAJECTORY_FILE: &str = "trajectory.csv";

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST_FILE).exists()
    }

    /// Persist the integrator's last run under a content-hashed id.
    ///
    /// The stored config is read back from the integrator itself. Runs that
    /// are not `Solved` are refused before anything is written.
    pub fn save_integrator(
        &self,
        name: &str,
        model: &ModelDef,
        integrator: &Integrator,
        solver_version: &str,
    ) -> ResultsResult<RunManifest> {
        let trajectory = require_solved(integrator)?;
        let config = RunConfig::from_integrator(name, model, integrator);
        let manifest = RunManifest {
            run_id: compute_run_id(&config, solver_version),
            config,
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: solver_version.to_string(),
            sample_count: trajectory.len(),
            dimension: trajectory.dimension(),
            final_state: trajectory
                .final_state()
                .map(|y| y.as_slice().to_vec())
                .unwrap_or_default(),
        };
        self.save_run(&manifest, trajectory)?;
        Ok(manifest)
    }

    pub fn save_run(&self, manifest: &RunManifest, trajectory: &Trajectory) -> ResultsResult<()> {
        let csv = to_csv_string(trajectory)?;

        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST_FILE), manifest_json)?;
        fs::write(run_dir.join(TRAJECTORY_FILE), csv)?;

        info!(run_id = %manifest.run_id, samples = trajectory.len(), "run saved");
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_trajectory(&self, run_id: &str) -> ResultsResult<Trajectory> {
        let trajectory_path = self.run_dir(run_id).join(TRAJECTORY_FILE);

        if !trajectory_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(trajectory_path)?;
        parse_csv(&content)
    }

    /// All stored runs, oldest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
