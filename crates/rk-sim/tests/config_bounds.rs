//! Configuration and initial-state validation.

use rk_core::Vector;
use rk_sim::{InitialStatePolicy, Integrator, MAX_STEPS, RunStatus, SimError, SimResult};

fn sir_start() -> Vector {
    Vector::from([0.99, 0.01, 0.00])
}

#[test]
fn initial_state_must_sum_to_one() {
    let err = Integrator::new(Vector::from([0.5, 0.4, 0.2])).unwrap_err();
    match err {
        SimError::InvalidInitialState { sum } => assert!((sum - 1.1).abs() < 1e-12),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(Integrator::new(sir_start()).is_ok());
}

#[test]
fn step_bounds() {
    let mut integ = Integrator::new(sir_start()).unwrap();
    for bad in [0.0, -1.0, 100.5, f64::NAN] {
        let err = integ.set_step(bad).unwrap_err();
        assert!(
            matches!(err, SimError::InvalidConfiguration { what: "step", bound, .. } if bound == 100.0),
            "step {bad} gave {err:?}"
        );
    }
    // step equal to the final time is allowed
    integ.set_step(100.0).unwrap();
    assert_eq!(integ.n_steps(), 1);
}

#[test]
fn final_time_bounds() {
    let mut integ = Integrator::new(sir_start()).unwrap();
    integ.set_step(2.0).unwrap();
    for bad in [2.0, 1.0, 0.0, -5.0] {
        let err = integ.set_final_time(bad).unwrap_err();
        match err {
            SimError::InvalidConfiguration { what, value, bound } => {
                assert_eq!(what, "final_time");
                assert_eq!(value, bad);
                assert_eq!(bound, 2.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
    // failed updates leave the configuration untouched
    assert_eq!(integ.final_time(), 100.0);
    assert_eq!(integ.n_steps(), 50);
}

#[test]
fn validation_uses_current_values() {
    let mut integ = Integrator::new(sir_start()).unwrap();
    // step 1 is below the default final time; 500 is then above the new step
    integ.set_step(1.0).unwrap();
    integ.set_final_time(500.0).unwrap();
    assert_eq!(integ.sample_count(), 501);

    // 400 was out of range under the default final time, fine now
    integ.set_step(400.0).unwrap();
    assert_eq!(integ.n_steps(), 1);
    assert!(integ.set_final_time(300.0).is_err());
}

#[test]
fn tiny_step_is_rejected_before_allocating() {
    let mut integ = Integrator::new(sir_start()).unwrap();
    let err = integ.set_step(1e-300).unwrap_err();
    match err {
        SimError::InvalidConfiguration { what, value, bound } => {
            assert_eq!(what, "step");
            assert_eq!(value, 1e-300);
            assert_eq!(bound, 100.0 / MAX_STEPS as f64);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(integ.step(), 0.1);
    assert_eq!(integ.n_steps(), 1000);
}

#[test]
fn step_count_is_capped_for_both_setters() {
    let mut integ = Integrator::new(sir_start()).unwrap();
    integ.set_final_time(1e6).unwrap();
    assert!(integ.set_step(1e-9).is_err());
    assert_eq!(integ.step(), 0.1);

    // final time growing past the cap under the current step is refused too
    let err = integ.set_final_time(1e300).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { what: "final_time", .. }));
    assert_eq!(integ.final_time(), 1e6);

    // exactly MAX_STEPS steps is still accepted
    integ.configure(1.0, MAX_STEPS as f64).unwrap();
    assert_eq!(integ.n_steps(), MAX_STEPS);
}

#[test]
fn rejected_configure_leaves_integrator_untouched() {
    let zero = |y: &Vector| -> SimResult<Vector> { Ok(Vector::zeros(y.len())?) };
    let mut integ = Integrator::new(sir_start()).unwrap();
    integ.configure(1.0, 10.0).unwrap();
    integ.solve(&zero).unwrap();

    // step larger than the requested final time
    let err = integ.configure(200.0, 150.0).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { what: "step", .. }));
    assert_eq!(integ.step(), 1.0);
    assert_eq!(integ.final_time(), 10.0);
    assert_eq!(integ.status(), &RunStatus::Solved);
    assert_eq!(integ.trajectory().map(|t| t.len()), Some(11));

    assert!(integ.configure(0.1, f64::INFINITY).is_err());
    assert!(integ.configure(1e-300, 1.0).is_err());
    assert_eq!(integ.step(), 1.0);
    assert!(integ.is_solved());
}

#[test]
fn empty_initial_state_is_rejected() {
    for policy in [InitialStatePolicy::SumToOne, InitialStatePolicy::Unchecked] {
        let err = Integrator::with_policy(Vector::from(Vec::new()), policy).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }), "{policy:?} gave {err:?}");
    }
    let mut integ = Integrator::new(sir_start()).unwrap();
    assert!(integ.set_initial_state(Vector::from(Vec::new())).is_err());
    assert_eq!(integ.initial_state().len(), 3);
}

#[test]
fn sum_to_one_allows_rounding_in_decimal_inputs() {
    // 0.7 + 0.2 + 0.1 is 0.9999999999999999 in f64
    assert!(Integrator::new(Vector::from([0.7, 0.2, 0.1])).is_ok());
    assert!(Integrator::new(Vector::from([0.5, 0.5 + 1e-6, 0.0])).is_err());
}
