use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rk_core::Vector;
use rk_results::*;
use rk_sim::{Integrator, SirModel};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn sir_config() -> RunConfig {
    RunConfig {
        name: "sir-short".to_string(),
        model: ModelDef::default(),
        step: 1.0,
        final_time: 30.0,
        initial_state: vec![0.99, 0.01, 0.0],
    }
}

fn solved_integrator(config: &RunConfig) -> Integrator {
    let mut integ = Integrator::new(Vector::from_slice(&config.initial_state)).unwrap();
    integ.configure(config.step, config.final_time).unwrap();
    let model = config.model.build().unwrap();
    integ.solve(&*model).unwrap();
    integ
}

#[test]
fn save_and_load_run() {
    let store = RunStore::new(unique_temp_dir("rk_results_test")).unwrap();
    let config = sir_config();
    let integ = solved_integrator(&config);

    let manifest = store
        .save_integrator(&config.name, &config.model, &integ, "v1")
        .unwrap();
    assert!(store.has_run(&manifest.run_id));
    assert_eq!(manifest.sample_count, 31);
    assert_eq!(manifest.dimension, 3);

    let loaded_manifest = store.load_manifest(&manifest.run_id).unwrap();
    assert_eq!(loaded_manifest.run_id, manifest.run_id);
    assert_eq!(loaded_manifest.config, config);
    assert_eq!(loaded_manifest.final_state, manifest.final_state);

    let loaded = store.load_trajectory(&manifest.run_id).unwrap();
    assert_eq!(&loaded, integ.trajectory().unwrap());

    let runs = store.list_runs().unwrap();
    assert_eq!(runs.len(), 1);

    store.delete_run(&manifest.run_id).unwrap();
    assert!(!store.has_run(&manifest.run_id));
    assert!(matches!(
        store.load_manifest(&manifest.run_id),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn failed_run_is_not_saved() {
    let dir = unique_temp_dir("rk_results_failed");
    let store = RunStore::new(dir.clone()).unwrap();
    let config = sir_config();

    let mut integ = Integrator::new(Vector::from([0.99, 0.01, 0.0])).unwrap();
    let broken = |_: &Vector| -> rk_sim::SimResult<Vector> {
        Err(rk_sim::SimError::InvalidArg { what: "broken" })
    };
    assert!(integ.solve(&broken).is_err());

    let err = store
        .save_integrator(&config.name, &config.model, &integ, "v1")
        .unwrap_err();
    assert!(matches!(err, ResultsError::RunNotSolved { .. }));
    assert!(store.list_runs().unwrap().is_empty());

    // a healthy re-solve can then be stored
    integ.solve(&SirModel::default()).unwrap();
    assert!(
        store
            .save_integrator(&config.name, &config.model, &integ, "v1")
            .is_ok()
    );
}

#[test]
fn manifest_describes_the_stored_trajectory() {
    let store = RunStore::new(unique_temp_dir("rk_results_consistent")).unwrap();
    let config = sir_config();

    // integrator left at the default step and final time, with a different
    // initial state than `config` names
    let mut integ = Integrator::new(Vector::from([0.5, 0.5, 0.0])).unwrap();
    integ.solve(&SirModel::default()).unwrap();

    let manifest = store
        .save_integrator(&config.name, &config.model, &integ, "v1")
        .unwrap();
    assert_eq!(manifest.config.step, 0.1);
    assert_eq!(manifest.config.final_time, 100.0);
    assert_eq!(manifest.config.initial_state, vec![0.5, 0.5, 0.0]);
    assert_eq!(manifest.sample_count, 1001);
    assert_ne!(manifest.run_id, compute_run_id(&config, "v1"));

    let loaded = store.load_trajectory(&manifest.run_id).unwrap();
    assert_eq!(loaded.len(), manifest.sample_count);
    assert_eq!(loaded.states()[0].as_slice(), manifest.config.initial_state.as_slice());
    let last_t = loaded.times()[loaded.len() - 1];
    assert!((last_t - manifest.config.final_time).abs() < 1e-9);
}
