//! Fixed-step RK4 stepper.

use rk_core::{CoreError, Vector};

use crate::error::{SimError, SimResult};
use crate::model::OdeSystem;

/// Classical RK4 (Runge-Kutta 4th order) stepper.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl RK4 {
    /// Right-hand side evaluations per step.
    pub const STAGES: usize = 4;

    /// Advance `y` by one step of size `h`.
    ///
    /// `step` is the 1-based index of the step being computed and is only
    /// used to label failures.
    pub fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        y: &Vector,
        h: f64,
        step: usize,
    ) -> SimResult<Vector> {
        let k1 = eval(system, y, step)?;

        let y2 = y.add_scaled(0.5 * h, &k1)?;
        let k2 = eval(system, &y2, step)?;

        let y3 = y.add_scaled(0.5 * h, &k2)?;
        let k3 = eval(system, &y3, step)?;

        let y4 = y.add_scaled(h, &k3)?;
        let k4 = eval(system, &y4, step)?;

        // Combine: y_new = y + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1
            .add_scaled(2.0, &k2)?
            .add_scaled(2.0, &k3)?
            .add(&k4)?;

        Ok(y.add_scaled(h / 6.0, &k_sum)?)
    }
}

/// Evaluate the right-hand side, tagging failures with the step index and
/// rejecting derivatives whose length differs from the state.
fn eval<S: OdeSystem + ?Sized>(system: &S, y: &Vector, step: usize) -> SimResult<Vector> {
    let dy = system.rhs(y).map_err(|e| match e {
        SimError::RightHandSideFailure { .. } => e,
        other => SimError::RightHandSideFailure {
            step,
            message: other.to_string(),
        },
    })?;

    if dy.len() != y.len() {
        return Err(SimError::ShapeMismatch(CoreError::ShapeMismatch {
            op: "rhs",
            left: y.len(),
            right: dy.len(),
        }));
    }
    Ok(dy)
}
