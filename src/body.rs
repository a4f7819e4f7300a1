//! Circular bodies: per-step integration and the boundary response.

use bevy::math::DVec2;
use serde::Deserialize;

use crate::boundary::Boundary;
use crate::policy::EnginePolicy;

/// Opaque display tag carried through to the drawing surface.
///
/// The engine never interprets it; the host resolves names like `"crimson"`
/// or hex strings like `"#ff8800"` when it draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(pub String);

impl ColorTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorTag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A simulated circular particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Only ever grows.
    pub radius: f64,
    pub color: ColorTag,
    /// Per-body speed cap; falls back to [`EnginePolicy::max_speed`].
    pub max_speed: Option<f64>,
    /// Per-body gravity; falls back to [`EnginePolicy::gravity`].
    pub gravity: Option<f64>,
}

impl Body {
    pub fn new(position: DVec2, radius: f64, color: impl Into<ColorTag>, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            radius,
            color: color.into(),
            max_speed: None,
            gravity: None,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn speed_cap(&self, policy: &EnginePolicy) -> Option<f64> {
        self.max_speed.or(policy.max_speed)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.radius.is_finite()
    }

    /// Advance one frame: `position += velocity`, then apply gravity.
    ///
    /// Gravity-driven speed is held to the body's cap when one applies.
    pub fn integrate(&mut self, policy: &EnginePolicy) {
        self.position += self.velocity;
        let gravity = self.gravity.unwrap_or(policy.gravity);
        if gravity != 0.0 {
            self.velocity.y += gravity;
            if let Some(cap) = self.speed_cap(policy) {
                self.clamp_speed(cap);
            }
        }
    }

    /// Reflect the body off the boundary if it touches or crosses it.
    ///
    /// Returns `true` when a contact was resolved.
    pub fn resolve_boundary(&mut self, boundary: &Boundary, policy: &EnginePolicy) -> bool {
        let offset = self.position - boundary.center();
        let dist = offset.length();
        if dist + self.radius < boundary.radius() {
            return false;
        }

        let angle = offset.y.atan2(offset.x);
        let radial = DVec2::new(angle.cos(), angle.sin());

        // Radial direction is the true normal for a circular boundary, so
        // pointing each component inward is a reflection toward the center.
        self.velocity = -radial * self.velocity.abs() * policy.bounce_gain;

        if policy.position_correction {
            let overlap = dist + self.radius - boundary.radius();
            self.position -= radial * overlap;
        }

        if let Some(cap) = self.speed_cap(policy) {
            self.clamp_speed(cap);
        }
        true
    }

    /// Scale velocity down to `max_speed` if it is faster, keeping direction.
    pub fn clamp_speed(&mut self, max_speed: f64) {
        let speed = self.speed();
        if speed > max_speed {
            self.velocity *= max_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Boundary {
        Boundary::new(DVec2::new(600.0, 340.0), 300.0).unwrap()
    }

    // ── integrate ─────────────────────────────────────────────────────────────

    #[test]
    fn integrate_moves_by_velocity() {
        let mut b = Body::new(DVec2::new(10.0, 20.0), 5.0, "red", DVec2::new(3.0, -2.0));
        b.integrate(&EnginePolicy::enhanced());
        assert_eq!(b.position, DVec2::new(13.0, 18.0));
        assert_eq!(b.velocity, DVec2::new(3.0, -2.0));
    }

    #[test]
    fn gravity_accumulates_every_step() {
        let mut b = Body::new(DVec2::ZERO, 5.0, "red", DVec2::new(1.0, 2.0));
        let policy = EnginePolicy::simple();
        for _ in 0..10 {
            b.integrate(&policy);
        }
        assert!((b.velocity.y - 3.0).abs() < 1e-12, "vy = {}", b.velocity.y);
        assert_eq!(b.velocity.x, 1.0);
    }

    #[test]
    fn per_body_gravity_overrides_policy() {
        let mut b = Body::new(DVec2::ZERO, 5.0, "red", DVec2::ZERO).with_gravity(0.5);
        b.integrate(&EnginePolicy::enhanced());
        assert_eq!(b.velocity.y, 0.5);
    }

    #[test]
    fn gravity_cannot_push_past_the_speed_cap() {
        let mut b = Body::new(DVec2::ZERO, 5.0, "red", DVec2::ZERO)
            .with_gravity(0.5)
            .with_max_speed(10.0);
        let policy = EnginePolicy::enhanced();
        for _ in 0..40 {
            b.integrate(&policy);
            assert!(b.speed() <= 10.0 + 1e-9, "speed {}", b.speed());
        }
        assert!((b.velocity.y - 10.0).abs() < 1e-9);
    }

    // ── resolve_boundary ──────────────────────────────────────────────────────

    #[test]
    fn interior_body_is_untouched() {
        let mut b = Body::new(DVec2::new(600.0, 340.0), 30.0, "red", DVec2::new(4.0, 4.0));
        let before = b.clone();
        assert!(!b.resolve_boundary(&ring(), &EnginePolicy::simple()));
        assert_eq!(b, before);
    }

    #[test]
    fn tangent_body_reflects_toward_center_simple() {
        // 45° down-right of center, just touching the boundary.
        let d = 271.0 / 2f64.sqrt();
        let pos = DVec2::new(600.0 + d, 340.0 + d);
        let mut b = Body::new(pos, 30.0, "red", DVec2::new(4.0, 4.0));

        assert!(b.resolve_boundary(&ring(), &EnginePolicy::simple()));

        let expected = -4.0 / 2f64.sqrt();
        assert!((b.velocity.x - expected).abs() < 1e-9);
        assert!((b.velocity.y - expected).abs() < 1e-9);
        assert_eq!(b.position, pos, "simple variant must not move the body");
    }

    #[test]
    fn reflected_velocity_points_inward_regardless_of_sign() {
        // Right edge, moving inward already: still ends up pointing inward.
        let mut b = Body::new(DVec2::new(880.0, 340.0), 30.0, "red", DVec2::new(-4.0, 0.0));
        b.resolve_boundary(&ring(), &EnginePolicy::simple());
        assert!(b.velocity.x < 0.0);
    }

    #[test]
    fn enhanced_corrects_penetration_along_radius() {
        // 5 units past the right edge.
        let mut b = Body::new(DVec2::new(875.0, 340.0), 30.0, "red", DVec2::new(2.0, 0.0));
        assert!(b.resolve_boundary(&ring(), &EnginePolicy::enhanced()));
        assert!((b.position.x - 870.0).abs() < 1e-9, "x = {}", b.position.x);
        assert!((b.position.y - 340.0).abs() < 1e-9);
        assert!((b.velocity.x + 2.4).abs() < 1e-9, "bounce gain 1.2 applied");
    }

    #[test]
    fn enhanced_boundary_contact_caps_speed() {
        let mut b = Body::new(DVec2::new(880.0, 340.0), 30.0, "red", DVec2::new(50.0, 0.0))
            .with_max_speed(10.0);
        b.resolve_boundary(&ring(), &EnginePolicy::enhanced());
        assert!((b.speed() - 10.0).abs() < 1e-9);
        assert!(b.velocity.x < 0.0);
    }

    #[test]
    fn clamp_speed_preserves_direction() {
        let mut b = Body::new(DVec2::ZERO, 1.0, "red", DVec2::new(30.0, 40.0));
        b.clamp_speed(5.0);
        assert!((b.velocity - DVec2::new(3.0, 4.0)).length() < 1e-12);
        b.clamp_speed(100.0);
        assert!((b.velocity - DVec2::new(3.0, 4.0)).length() < 1e-12);
    }
}
