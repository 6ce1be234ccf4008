//! Persisted run metadata.

use rk_sim::{Integrator, OdeSystem, SimResult, SirModel};
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Inputs that identify a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub name: String,
    pub model: ModelDef,
    pub step: f64,
    pub final_time: f64,
    pub initial_state: Vec<f64>,
}

impl RunConfig {
    /// Describe the integrator's current configuration. Step, final time
    /// and initial state always come from the integrator, so the manifest
    /// matches the trajectory stored next to it.
    pub fn from_integrator(name: &str, model: &ModelDef, integrator: &Integrator) -> Self {
        Self {
            name: name.to_string(),
            model: model.clone(),
            step: integrator.step(),
            final_time: integrator.final_time(),
            initial_state: integrator.initial_state().clone().into_vec(),
        }
    }
}

/// Right-hand side used for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ModelDef {
    Sir { r0: f64, gamma: f64 },
}

impl Default for ModelDef {
    fn default() -> Self {
        ModelDef::Sir {
            r0: SirModel::DEFAULT_R0,
            gamma: SirModel::DEFAULT_GAMMA,
        }
    }
}

impl ModelDef {
    /// Instantiate the right-hand side, validating its parameters.
    pub fn build(&self) -> SimResult<Box<dyn OdeSystem>> {
        match *self {
            ModelDef::Sir { r0, gamma } => Ok(Box::new(SirModel::new(r0, gamma)?)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub config: RunConfig,
    pub timestamp: String,
    pub solver_version: String,
    pub sample_count: usize,
    pub dimension: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub final_state: Vec<f64>,
}
