//! The fixed circular region that contains every body.

use bevy::math::DVec2;

use crate::error::{validate_radius, SimResult};

/// Immutable containment circle.
///
/// Fields are private so a boundary cannot change after the simulation is
/// built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    center: DVec2,
    radius: f64,
}

impl Boundary {
    pub fn new(center: DVec2, radius: f64) -> SimResult<Self> {
        validate_radius("boundary.radius", radius)?;
        Ok(Self { center, radius })
    }

    /// Boundary centered in a `width × height` display.
    pub fn centered_in(width: f64, height: f64, radius: f64) -> SimResult<Self> {
        Self::new(DVec2::new(width / 2.0, height / 2.0), radius)
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance from the boundary center to `point`.
    pub fn distance_from_center(&self, point: DVec2) -> f64 {
        point.distance(self.center)
    }

    /// How far a circle at `position` with `radius` pokes past the boundary.
    ///
    /// Zero or negative means the circle is fully inside.
    pub fn penetration(&self, position: DVec2, radius: f64) -> f64 {
        self.distance_from_center(position) + radius - self.radius
    }

    /// Whether a circle of `radius` at `position` fits inside (touching counts).
    pub fn fits(&self, position: DVec2, radius: f64) -> bool {
        self.penetration(position, radius) <= 0.0
    }
}
