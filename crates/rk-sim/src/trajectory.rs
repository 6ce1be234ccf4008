//! Time series produced by one integration run.

use rk_core::Vector;

/// Sample times paired one-to-one with state snapshots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    t: Vec<f64>,
    y: Vec<Vector>,
}

impl Trajectory {
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            t: Vec::with_capacity(samples),
            y: Vec::with_capacity(samples),
        }
    }

    /// Build from parallel time/state sequences. Returns `None` if their
    /// lengths differ.
    pub fn from_parts(t: Vec<f64>, y: Vec<Vector>) -> Option<Self> {
        (t.len() == y.len()).then_some(Self { t, y })
    }

    pub(crate) fn push(&mut self, t: f64, y: Vector) {
        self.t.push(t);
        self.y.push(y);
    }

    /// Drop all samples, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.t.clear();
        self.y.clear();
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.t
    }

    pub fn states(&self) -> &[Vector] {
        &self.y
    }

    /// State dimension, or 0 for an empty trajectory.
    pub fn dimension(&self) -> usize {
        self.y.first().map_or(0, Vector::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &Vector)> + '_ {
        self.t.iter().copied().zip(self.y.iter())
    }

    pub fn final_state(&self) -> Option<&Vector> {
        self.y.last()
    }

    /// Values of component `index` across all samples.
    pub fn component(&self, index: usize) -> Option<Vec<f64>> {
        self.y.iter().map(|v| v.get(index).ok()).collect()
    }
}
