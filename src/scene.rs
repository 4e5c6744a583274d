//! The entities drawn on the map.

use crate::math::Point2d;
use serde::{Deserialize, Serialize};

/// A straight stretch of road between two world-space points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct RoadSegment {
    pub start: Point2d,
    pub end: Point2d,
}

/// A vehicle position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Car {
    pub pos: Point2d,
}

/// A roadwork marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Roadwork {
    pub pos: Point2d,
}

/// A traffic light and the colour it is currently showing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub x: f64,
    pub y: f64,
    /// A CSS colour string, drawn as given.
    pub color: String,
}

impl TrafficLight {
    /// Gets the light's world position.
    pub fn pos(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

/// The moving parts of the scene at one instant.
///
/// Each update replaces the previous snapshot wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicSnapshot {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub lights: Vec<TrafficLight>,
    #[serde(default)]
    pub roadworks: Vec<Roadwork>,
}

impl DynamicSnapshot {
    /// Returns true if there is nothing to draw besides the roads.
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty() && self.lights.is_empty() && self.roadworks.is_empty()
    }
}

impl From<[[f64; 2]; 2]> for RoadSegment {
    fn from([[x1, y1], [x2, y2]]: [[f64; 2]; 2]) -> Self {
        Self {
            start: Point2d::new(x1, y1),
            end: Point2d::new(x2, y2),
        }
    }
}

impl From<RoadSegment> for [[f64; 2]; 2] {
    fn from(road: RoadSegment) -> Self {
        [[road.start.x, road.start.y], [road.end.x, road.end.y]]
    }
}

impl From<[f64; 2]> for Car {
    fn from([x, y]: [f64; 2]) -> Self {
        Self {
            pos: Point2d::new(x, y),
        }
    }
}

impl From<Car> for [f64; 2] {
    fn from(car: Car) -> Self {
        [car.pos.x, car.pos.y]
    }
}

impl From<[f64; 2]> for Roadwork {
    fn from([x, y]: [f64; 2]) -> Self {
        Self {
            pos: Point2d::new(x, y),
        }
    }
}

impl From<Roadwork> for [f64; 2] {
    fn from(work: Roadwork) -> Self {
        [work.pos.x, work.pos.y]
    }
}
