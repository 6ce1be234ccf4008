//! Dense fixed-length state vector.
//!
//! Arithmetic between two vectors is checked: operands of unequal length
//! produce [`CoreError::ShapeMismatch`] instead of a truncated result.
//! Scaling by a scalar cannot fail and is also available through `*`
//! in either operand order.

use core::fmt;
use core::ops::{Index, IndexMut, Mul};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Ordered, fixed-length sequence of reals.
///
/// The length is set at construction and never changes. Every operation
/// returns a freshly allocated vector (or scalar); operands are never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Vec<Real>,
}

impl Vector {
    /// Zero vector of length `len`. A zero length is rejected.
    pub fn zeros(len: usize) -> CoreResult<Self> {
        if len == 0 {
            return Err(CoreError::InvalidLength { len });
        }
        Ok(Self {
            data: vec![0.0; len],
        })
    }

    /// Copy of `values`.
    pub fn from_slice(values: &[Real]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &Real> + '_ {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<Real> {
        self.data
    }

    pub fn get(&self, index: usize) -> CoreResult<Real> {
        self.data.get(index).copied().ok_or(CoreError::IndexOob {
            what: "vector get",
            index,
            len: self.data.len(),
        })
    }

    pub fn set(&mut self, index: usize, value: Real) -> CoreResult<()> {
        let len = self.data.len();
        let slot = self.data.get_mut(index).ok_or(CoreError::IndexOob {
            what: "vector set",
            index,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Elementwise `self + other`.
    pub fn add(&self, other: &Vector) -> CoreResult<Vector> {
        self.zip_with("add", other, |a, b| a + b)
    }

    /// Elementwise `self - other`.
    pub fn subtract(&self, other: &Vector) -> CoreResult<Vector> {
        self.zip_with("subtract", other, |a, b| a - b)
    }

    /// `self + scale * other` in one pass.
    pub fn add_scaled(&self, scale: Real, other: &Vector) -> CoreResult<Vector> {
        self.zip_with("add_scaled", other, |a, b| a + scale * b)
    }

    pub fn dot(&self, other: &Vector) -> CoreResult<Real> {
        self.check_len("dot", other)?;
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    pub fn scale(&self, scalar: Real) -> Vector {
        Vector {
            data: self.data.iter().map(|a| a * scalar).collect(),
        }
    }

    pub fn sum(&self) -> Real {
        self.data.iter().sum()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    fn check_len(&self, op: &'static str, other: &Vector) -> CoreResult<()> {
        if self.len() != other.len() {
            return Err(CoreError::ShapeMismatch {
                op,
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    fn zip_with(
        &self,
        op: &'static str,
        other: &Vector,
        f: impl Fn(Real, Real) -> Real,
    ) -> CoreResult<Vector> {
        self.check_len(op, other)?;
        Ok(Vector {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl From<Vec<Real>> for Vector {
    fn from(data: Vec<Real>) -> Self {
        Self { data }
    }
}

impl<const N: usize> From<[Real; N]> for Vector {
    fn from(values: [Real; N]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        &mut self.data[index]
    }
}

impl Mul<Real> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: Real) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<Real> for Vector {
    type Output = Vector;

    fn mul(mut self, scalar: Real) -> Vector {
        self.data.iter_mut().for_each(|a| *a *= scalar);
        self
    }
}

impl Mul<&Vector> for Real {
    type Output = Vector;

    fn mul(self, v: &Vector) -> Vector {
        v.scale(self)
    }
}

impl Mul<Vector> for Real {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_rejects_empty() {
        assert_eq!(
            Vector::zeros(0).unwrap_err(),
            CoreError::InvalidLength { len: 0 }
        );
        let v = Vector::zeros(4).unwrap();
        assert_eq!(v.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn clone_is_deep() {
        let a = Vector::from([1.0, 2.0]);
        let mut b = a.clone();
        b[0] = 10.0;
        assert_eq!(a[0], 1.0);
        assert_eq!(b[0], 10.0);
    }

    #[test]
    fn checked_access() {
        let mut v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v.get(2).unwrap(), 3.0);
        v.set(1, 5.0).unwrap();
        assert_eq!(v[1], 5.0);
        assert!(matches!(
            v.get(3),
            Err(CoreError::IndexOob { index: 3, len: 3, .. })
        ));
        assert!(v.set(7, 0.0).is_err());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let v = Vector::from([1.0]);
        let _ = v[1];
    }

    #[test]
    fn arithmetic_basic() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([4.0, 5.0, 6.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!(b.subtract(&a).unwrap().as_slice(), &[3.0, 3.0, 3.0]);
        assert_eq!(a.dot(&b).unwrap(), 32.0);
        assert_eq!(a.add_scaled(2.0, &b).unwrap().as_slice(), &[9.0, 12.0, 15.0]);
        assert_eq!(a.sum(), 6.0);
    }

    #[test]
    fn scaling_commutes() {
        let a = Vector::from([1.0, -2.0]);
        assert_eq!(&a * 3.0, 3.0 * &a);
        assert_eq!(a.clone() * 3.0, 3.0 * a.clone());
        assert_eq!((&a * 3.0).as_slice(), &[3.0, -6.0]);
        // operand untouched
        assert_eq!(a.as_slice(), &[1.0, -2.0]);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let a = Vector::from([1.0, 2.0]);
        let b = Vector::from([1.0, 2.0, 3.0]);
        let expected = |op| CoreError::ShapeMismatch {
            op,
            left: 2,
            right: 3,
        };
        assert_eq!(a.add(&b).unwrap_err(), expected("add"));
        assert_eq!(a.subtract(&b).unwrap_err(), expected("subtract"));
        assert_eq!(a.dot(&b).unwrap_err(), expected("dot"));
    }

    #[test]
    fn display_lists_elements() {
        let v = Vector::from([0.5, 1.0]);
        assert_eq!(v.to_string(), "[0.5, 1]");
    }
}
