//! Kinematic state shared by the player's car and the traffic.

use nalgebra::Vector3;

use super::{BoundingBox, HasCollision, Position};

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    position: Position,
    speed: f64,
    lateral_bound: LateralBound,
    dimensions: Dimensions,
}

impl VehicleState {
    pub fn new(
        position: Position,
        speed: f64,
        lateral_bound: LateralBound,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            position: lateral_bound.confine(position),
            speed,
            lateral_bound,
            dimensions,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn lateral_bound(&self) -> LateralBound {
        self.lateral_bound
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The lateral offset is confined to the lateral bound.
    pub fn set_position(&mut self, position: Position) {
        self.position = self.lateral_bound.confine(position);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }
}

impl HasCollision for VehicleState {
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            Vector3::new(
                self.position.lateral(),
                self.dimensions.ride_height,
                self.position.forward(),
            ),
            self.dimensions.half_extent(),
        )
    }
}

/// Range of lateral offsets a vehicle may occupy, measured at its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LateralBound {
    pub min: f64,
    pub max: f64,
}

impl LateralBound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, lateral: f64) -> bool {
        (self.min..=self.max).contains(&lateral)
    }

    pub fn confine(&self, position: Position) -> Position {
        position.with_lateral(position.lateral().clamp(self.min, self.max))
    }
}

impl Default for LateralBound {
    fn default() -> Self {
        Self::new(-8.0, 8.0)
    }
}

/// Outer size of a car body. `width` is lateral, `length` is forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
    // Height of the body center above the road surface
    pub ride_height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, length: f64, ride_height: f64) -> Self {
        Self {
            width,
            height,
            length,
            ride_height,
        }
    }

    pub fn half_extent(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.length) / 2.0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(1.6, 1.1, 2.7, 0.5)
    }
}
