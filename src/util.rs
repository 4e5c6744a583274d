//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: Float> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }

    /// Returns true if the interval has a finite, strictly positive length.
    pub fn is_proper(&self) -> bool {
        let len = self.length();
        len.is_finite() && len > T::zero()
    }

    /// Maps a fraction in `[0, 1]` onto the interval.
    pub fn lerp(&self, t: T) -> T {
        self.min + t * (self.max - self.min)
    }

    /// Maps a value in the interval onto a fraction in `[0, 1]`.
    pub fn inv_lerp(&self, value: T) -> T {
        (value - self.min) / (self.max - self.min)
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;

    #[test]
    fn lerp_inverts_inv_lerp() {
        let range = Interval::new(-20.0, 80.0);
        assert_eq!(range.inv_lerp(30.0), 0.5);
        assert_eq!(range.lerp(0.25), 5.0);
        assert_eq!(range.lerp(range.inv_lerp(-7.5)), -7.5);
    }

    #[test]
    fn zero_length_is_not_proper() {
        assert!(!Interval::new(3.0, 3.0).is_proper());
        assert!(!Interval::new(4.0, 3.0).is_proper());
        assert!(!Interval::new(0.0, f64::INFINITY).is_proper());
        assert!(Interval::new(0.0, 1e-9).is_proper());
    }
}
