use crate::error::{Result, ViewError};
use crate::math::Point2d;
use crate::util::Interval;
use serde::{Deserialize, Serialize};

/// The rectangular extent of the simulated world.
///
/// On the wire the bounds travel as `[min_x, max_x, min_y, max_y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct WorldBounds {
    /// The horizontal extent.
    pub x: Interval<f64>,
    /// The vertical extent; world "up" is towards `y.max`.
    pub y: Interval<f64>,
}

impl WorldBounds {
    /// Creates world bounds, rejecting any that enclose no area.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        let bounds = Self::from([min_x, max_x, min_y, max_y]);
        bounds.validate()?;
        Ok(bounds)
    }

    /// Checks that `max_x > min_x` and `max_y > min_y`.
    pub fn validate(&self) -> Result<()> {
        if self.x.is_proper() && self.y.is_proper() {
            Ok(())
        } else {
            Err(ViewError::DegenerateBounds {
                min_x: self.x.min,
                max_x: self.x.max,
                min_y: self.y.min,
                max_y: self.y.max,
            })
        }
    }

    /// Returns true if the point lies within the bounds, edges included.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Gets the centre of the world.
    pub fn centre(&self) -> Point2d {
        Point2d::new(self.x.lerp(0.5), self.y.lerp(0.5))
    }
}

impl From<[f64; 4]> for WorldBounds {
    fn from([min_x, max_x, min_y, max_y]: [f64; 4]) -> Self {
        Self {
            x: Interval::new(min_x, max_x),
            y: Interval::new(min_y, max_y),
        }
    }
}

impl From<WorldBounds> for [f64; 4] {
    fn from(bounds: WorldBounds) -> Self {
        [bounds.x.min, bounds.x.max, bounds.y.min, bounds.y.max]
    }
}
