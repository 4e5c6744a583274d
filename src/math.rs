//! Mathematical types shared by the viewport and the renderer.

use cgmath::{Point2, Vector2};

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// Returns true if the value is finite and strictly positive.
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
