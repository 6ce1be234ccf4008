//! OdeSystem trait for pluggable right-hand sides.

use rk_core::Vector;

use crate::error::SimResult;

/// Right-hand side of an autonomous first-order system `dy/dt = f(y)`.
///
/// Implementations must be deterministic and side-effect free, and must
/// return a derivative with the same length as `y`. Any closure
/// `Fn(&Vector) -> SimResult<Vector>` is an `OdeSystem`.
pub trait OdeSystem {
    /// Compute the derivative at state `y`.
    fn rhs(&self, y: &Vector) -> SimResult<Vector>;

    /// Expected state dimension, if the system has a fixed one.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<F> OdeSystem for F
where
    F: Fn(&Vector) -> SimResult<Vector>,
{
    fn rhs(&self, y: &Vector) -> SimResult<Vector> {
        self(y)
    }
}
