//! Integration driver: configuration, run state and trajectory recording.

use rk_core::timing::Timer;
use rk_core::{Tolerances, Vector, nearly_equal};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::integrator::RK4;
use crate::model::OdeSystem;
use crate::trajectory::Trajectory;

pub const DEFAULT_STEP: f64 = 0.1;
pub const DEFAULT_FINAL_TIME: f64 = 100.0;
/// Largest step count a configuration may imply; trajectory buffers hold
/// `MAX_STEPS + 1` samples at most.
pub const MAX_STEPS: usize = 1_000_000;

/// Validation applied to the initial state on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InitialStatePolicy {
    /// Components must sum to 1.0 (population fractions), compared with
    /// `Tolerances::default()` (abs 1e-12, rel 1e-9) rather than bitwise so
    /// that decimal inputs like `[0.7, 0.2, 0.1]` pass.
    #[default]
    SumToOne,
    /// Accept any non-empty finite state.
    Unchecked,
}

impl InitialStatePolicy {
    pub fn check(&self, initial: &Vector) -> SimResult<()> {
        if initial.is_empty() {
            return Err(SimError::InvalidArg {
                what: "initial state must have at least one component",
            });
        }
        if !initial.is_finite() {
            return Err(SimError::InvalidArg {
                what: "initial state must be finite",
            });
        }
        match self {
            InitialStatePolicy::SumToOne => {
                let sum = initial.sum();
                if nearly_equal(sum, 1.0, Tolerances::default()) {
                    Ok(())
                } else {
                    Err(SimError::InvalidInitialState { sum })
                }
            }
            InitialStatePolicy::Unchecked => Ok(()),
        }
    }
}

/// Outcome of the most recent `solve`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RunStatus {
    /// Configured but not (successfully) solved since the last change.
    #[default]
    Configured,
    Solved,
    Failed(SimError),
}

/// Progress snapshot emitted after every completed step.
#[derive(Clone, Debug)]
pub struct SolveProgress {
    pub step: usize,
    pub n_steps: usize,
    pub t: f64,
    pub fraction_complete: f64,
}

/// Counters for the most recent `solve`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveStats {
    /// Steps completed before the run finished or failed.
    pub steps: usize,
    pub rhs_evaluations: usize,
    /// Wall time in seconds, when timing is enabled.
    pub elapsed_s: Option<f64>,
}

/// Fixed-step RK4 integrator over `[0, final_time]`.
///
/// Holds the configuration, the trajectory buffers and the status of the
/// last run. Setting the step or final time validates against the *current*
/// value of the other, recomputes the step count and discards any previous
/// trajectory.
#[derive(Clone, Debug)]
pub struct Integrator {
    step: f64,
    final_time: f64,
    n_steps: usize,
    initial: Vector,
    policy: InitialStatePolicy,
    trajectory: Trajectory,
    status: RunStatus,
    stats: SolveStats,
}

impl Integrator {
    /// Create with the default `SumToOne` initial-state policy.
    pub fn new(initial: Vector) -> SimResult<Self> {
        Self::with_policy(initial, InitialStatePolicy::default())
    }

    pub fn with_policy(initial: Vector, policy: InitialStatePolicy) -> SimResult<Self> {
        policy.check(&initial)?;
        let n_steps = step_count(DEFAULT_FINAL_TIME, DEFAULT_STEP)?;
        debug!(dimension = initial.len(), ?policy, "integrator created");
        Ok(Self {
            step: DEFAULT_STEP,
            final_time: DEFAULT_FINAL_TIME,
            n_steps,
            initial,
            policy,
            trajectory: Trajectory::with_capacity(n_steps + 1),
            status: RunStatus::Configured,
            stats: SolveStats::default(),
        })
    }

    /// Set step and final time together.
    ///
    /// The pair is validated as a whole (`0 < step <= final_time`, step
    /// count within `MAX_STEPS`) before either value changes, so a rejected
    /// call leaves the integrator untouched.
    pub fn configure(&mut self, step: f64, final_time: f64) -> SimResult<()> {
        if !(final_time.is_finite() && final_time > 0.0) {
            return Err(SimError::InvalidConfiguration {
                what: "final_time",
                value: final_time,
                bound: step,
            });
        }
        if !(step.is_finite() && step > 0.0 && step <= final_time) {
            return Err(SimError::InvalidConfiguration {
                what: "step",
                value: step,
                bound: final_time,
            });
        }
        let n_steps = step_count(final_time, step).map_err(|_| SimError::InvalidConfiguration {
            what: "step",
            value: step,
            bound: final_time / MAX_STEPS as f64,
        })?;
        self.step = step;
        self.final_time = final_time;
        self.reallocate(n_steps);
        Ok(())
    }

    /// Requires `0 < step <= final_time` and `final_time / step <= MAX_STEPS`.
    pub fn set_step(&mut self, step: f64) -> SimResult<()> {
        if !(step.is_finite() && step > 0.0 && step <= self.final_time) {
            return Err(SimError::InvalidConfiguration {
                what: "step",
                value: step,
                bound: self.final_time,
            });
        }
        let n_steps =
            step_count(self.final_time, step).map_err(|_| SimError::InvalidConfiguration {
                what: "step",
                value: step,
                bound: self.final_time / MAX_STEPS as f64,
            })?;
        self.step = step;
        self.reallocate(n_steps);
        Ok(())
    }

    /// Requires `final_time > 0`, `final_time > step` and
    /// `final_time / step <= MAX_STEPS`.
    pub fn set_final_time(&mut self, final_time: f64) -> SimResult<()> {
        if !(final_time.is_finite() && final_time > 0.0 && final_time > self.step) {
            return Err(SimError::InvalidConfiguration {
                what: "final_time",
                value: final_time,
                bound: self.step,
            });
        }
        let n_steps =
            step_count(final_time, self.step).map_err(|_| SimError::InvalidConfiguration {
                what: "final_time",
                value: final_time,
                bound: self.step * MAX_STEPS as f64,
            })?;
        self.final_time = final_time;
        self.reallocate(n_steps);
        Ok(())
    }

    /// Replace the initial state, validated by the integrator's policy.
    pub fn set_initial_state(&mut self, initial: Vector) -> SimResult<()> {
        self.policy.check(&initial)?;
        self.initial = initial;
        self.reallocate(self.n_steps);
        Ok(())
    }

    fn reallocate(&mut self, n_steps: usize) {
        self.n_steps = n_steps;
        self.trajectory = Trajectory::with_capacity(n_steps + 1);
        self.status = RunStatus::Configured;
        self.stats = SolveStats::default();
        debug!(
            step = self.step,
            final_time = self.final_time,
            n_steps = self.n_steps,
            "integrator reconfigured"
        );
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn final_time(&self) -> f64 {
        self.final_time
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Samples a successful run produces (`n_steps + 1`).
    pub fn sample_count(&self) -> usize {
        self.n_steps + 1
    }

    pub fn dimension(&self) -> usize {
        self.initial.len()
    }

    pub fn initial_state(&self) -> &Vector {
        &self.initial
    }

    pub fn policy(&self) -> InitialStatePolicy {
        self.policy
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == RunStatus::Solved
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Trajectory of the last run, only if it completed successfully.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.is_solved().then_some(&self.trajectory)
    }

    /// Integrate `system` from `t = 0` to `n_steps * step`.
    pub fn solve<S: OdeSystem + ?Sized>(&mut self, system: &S) -> SimResult<&Trajectory> {
        self.solve_with_progress(system, None)
    }

    /// Like [`Integrator::solve`], calling `progress` after every step.
    ///
    /// On failure the remaining steps are skipped, the status becomes
    /// `Failed` and the recorded samples are discarded.
    pub fn solve_with_progress<S: OdeSystem + ?Sized>(
        &mut self,
        system: &S,
        mut progress: Option<&mut dyn FnMut(&SolveProgress)>,
    ) -> SimResult<&Trajectory> {
        self.status = RunStatus::Configured;
        self.stats = SolveStats::default();
        self.trajectory.clear();
        debug!(
            step = self.step,
            n_steps = self.n_steps,
            dimension = self.initial.len(),
            "solve started"
        );

        let timer = Timer::start("solve");
        let result = integrate(
            system,
            &self.initial,
            self.step,
            self.n_steps,
            &mut self.trajectory,
            &mut self.stats,
            &mut progress,
        );
        self.stats.elapsed_s = timer.stop();

        match result {
            Ok(()) => {
                self.status = RunStatus::Solved;
                debug!(
                    samples = self.trajectory.len(),
                    rhs_evaluations = self.stats.rhs_evaluations,
                    "solve finished"
                );
                Ok(&self.trajectory)
            }
            Err(e) => {
                warn!(error = %e, completed_steps = self.stats.steps, "solve failed");
                self.trajectory.clear();
                self.status = RunStatus::Failed(e.clone());
                Err(e)
            }
        }
    }
}

fn integrate<S: OdeSystem + ?Sized>(
    system: &S,
    initial: &Vector,
    h: f64,
    n_steps: usize,
    trajectory: &mut Trajectory,
    stats: &mut SolveStats,
    progress: &mut Option<&mut dyn FnMut(&SolveProgress)>,
) -> SimResult<()> {
    if let Some(dim) = system.dimension() {
        if dim != initial.len() {
            return Err(SimError::ShapeMismatch(rk_core::CoreError::ShapeMismatch {
                op: "system dimension",
                left: initial.len(),
                right: dim,
            }));
        }
    }

    let mut t = 0.0;
    let mut y = initial.clone();
    trajectory.push(t, y.clone());

    for i in 1..=n_steps {
        let next = RK4.step(system, &y, h, i)?;
        stats.rhs_evaluations += RK4::STAGES;
        t += h;
        y = next;
        trajectory.push(t, y.clone());
        stats.steps = i;

        if let Some(cb) = progress.as_deref_mut() {
            cb(&SolveProgress {
                step: i,
                n_steps,
                t,
                fraction_complete: i as f64 / n_steps as f64,
            });
        }
    }
    Ok(())
}

/// `floor(final_time / step)`, guarded against ratios like `0.3 / 0.1`
/// landing just below an integer. Ratios above `MAX_STEPS` (or non-finite
/// ones) are rejected before any buffer is sized from them.
fn step_count(final_time: f64, step: f64) -> SimResult<usize> {
    let ratio = final_time / step;
    let n = (ratio + ratio * 1e-12).floor();
    if !(n.is_finite() && n <= MAX_STEPS as f64) {
        return Err(SimError::InvalidArg {
            what: "step count exceeds MAX_STEPS",
        });
    }
    Ok(n as usize)
}
