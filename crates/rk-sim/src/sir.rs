//! SIR compartmental epidemic model.
//!
//! State is `[S, I, R]` as population fractions:
//!
//! ```text
//! dS/dt = -beta * I * S
//! dI/dt =  beta * I * S - gamma * I
//! dR/dt =  gamma * I
//! ```
//!
//! with `beta = r0 * gamma`. The derivatives sum to zero, so `S + I + R`
//! is conserved.

use rk_core::{CoreError, Vector, ensure_finite};

use crate::error::{SimError, SimResult};
use crate::model::OdeSystem;

/// SIR right-hand side with fixed parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SirModel {
    r0: f64,
    gamma: f64,
}

impl SirModel {
    pub const DEFAULT_R0: f64 = 2.4;
    pub const DEFAULT_GAMMA: f64 = 1.0 / 14.0;

    /// `r0` must be finite and non-negative, `gamma` finite and positive.
    pub fn new(r0: f64, gamma: f64) -> SimResult<Self> {
        let r0 = ensure_finite(r0, "r0 must be finite and non-negative")?;
        let gamma = ensure_finite(gamma, "gamma must be finite and positive")?;
        if r0 < 0.0 {
            return Err(SimError::InvalidArg {
                what: "r0 must be finite and non-negative",
            });
        }
        if gamma <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "gamma must be finite and positive",
            });
        }
        Ok(Self { r0, gamma })
    }

    pub fn r0(&self) -> f64 {
        self.r0
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Transmission rate.
    pub fn beta(&self) -> f64 {
        self.r0 * self.gamma
    }
}

impl Default for SirModel {
    fn default() -> Self {
        Self {
            r0: Self::DEFAULT_R0,
            gamma: Self::DEFAULT_GAMMA,
        }
    }
}

impl OdeSystem for SirModel {
    fn rhs(&self, y: &Vector) -> SimResult<Vector> {
        if y.len() != 3 {
            return Err(SimError::ShapeMismatch(CoreError::ShapeMismatch {
                op: "sir state",
                left: y.len(),
                right: 3,
            }));
        }
        let (s, i) = (y[0], y[1]);

        let beta = self.beta();
        let infection = beta * i * s;
        let recovery = self.gamma * i;

        Ok(Vector::from([-infection, infection - recovery, recovery]))
    }

    fn dimension(&self) -> Option<usize> {
        Some(3)
    }
}
