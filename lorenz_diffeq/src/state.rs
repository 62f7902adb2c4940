use std::{
    fmt::Debug,
    ops::{AddAssign, Deref, DerefMut, MulAssign},
};

/// Trait representing an integrable state for use in ODE solvers.
///
/// The Runge-Kutta stages are assembled in place, so states only need
/// scaling by a scalar and accumulation of another state. The derivative
/// of a state is represented by the same type.
pub trait Integrable: Clone + Debug + Default + MulAssign<f64> + for<'a> AddAssign<&'a Self> {
    /// Returns false if any component of the state is NaN or infinite.
    fn is_finite(&self) -> bool;
}

/// A fixed-size array wrapper representing a generic state vector with `N` f64 components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateArray<const N: usize>([f64; N]);

impl<const N: usize> StateArray<N> {
    /// Constructs a new `StateArray` from an array of `f64`.
    pub fn new(array: [f64; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> Default for StateArray<N> {
    fn default() -> Self {
        Self([0.0; N])
    }
}

impl<const N: usize> AddAssign<&Self> for StateArray<N> {
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<const N: usize> MulAssign<f64> for StateArray<N> {
    fn mul_assign(&mut self, rhs: f64) {
        for i in 0..N {
            self.0[i] *= rhs;
        }
    }
}

impl<const N: usize> Integrable for StateArray<N> {
    fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl<const N: usize> Deref for StateArray<N> {
    type Target = [f64; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for StateArray<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_array_arithmetic() {
        let mut a = StateArray::new([1.0, 2.0, 3.0]);
        let b = StateArray::new([0.5, 0.5, 0.5]);
        a += &b;
        a *= 2.0;
        assert_eq!(*a, [3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_state_array_is_finite() {
        assert!(StateArray::new([1.0, -1e300]).is_finite());
        assert!(!StateArray::new([1.0, f64::NAN]).is_finite());
        assert!(!StateArray::new([f64::INFINITY, 0.0]).is_finite());
    }
}
