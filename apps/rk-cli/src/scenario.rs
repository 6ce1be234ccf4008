//! YAML scenario files.
//!
//! Every field is optional; omitted fields take the SIR reference values.

use std::fs;
use std::path::{Path, PathBuf};

use rk_results::ModelDef;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

pub const DEFAULT_OUTPUT: &str = "output.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub step: f64,
    pub final_time: f64,
    pub initial_state: Vec<f64>,
    pub model: ModelDef,
    pub output: PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "sir".to_string(),
            step: 1.0,
            final_time: 500.0,
            initial_state: vec![0.99, 0.01, 0.0],
            model: ModelDef::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| CliError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_reference_values() {
        let scenario: Scenario = serde_yaml::from_str("{}").unwrap();
        assert_eq!(scenario, Scenario::default());
        assert_eq!(scenario.initial_state, vec![0.99, 0.01, 0.0]);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
name: fast-spread
step: 0.5
final_time: 200.0
initial_state: [0.98, 0.02, 0.0]
model:
  type: Sir
  r0: 3.0
  gamma: 0.1
output: out/fast.csv
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.name, "fast-spread");
        assert_eq!(scenario.step, 0.5);
        assert_eq!(scenario.model, ModelDef::Sir { r0: 3.0, gamma: 0.1 });
        assert_eq!(scenario.output, PathBuf::from("out/fast.csv"));
        assert_eq!(scenario.final_time, 200.0);
    }

    #[test]
    fn unknown_model_is_rejected() {
        let yaml = "model:\n  type: Seir\n  r0: 2.0\n";
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }
}
