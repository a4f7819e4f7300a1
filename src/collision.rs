//! Pairwise contact response between two bodies.
//!
//! Touching bodies always try to grow; how their velocities change depends on
//! the [`ImpulseModel`] in the active [`EnginePolicy`].

use crate::body::Body;
use crate::boundary::Boundary;
use crate::constants::DEGENERATE_DISTANCE;
use crate::policy::{EnginePolicy, ImpulseModel};

/// What happened when a pair was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Footprints do not overlap.
    Separate,
    /// Footprints overlap and the contact was resolved.
    /// `impulse` is false when the approach model saw the pair separating.
    Touching { impulse: bool },
    /// Centers coincide, so no contact normal exists. Growth still happened;
    /// the velocity response was skipped for this frame.
    Coincident,
}

impl ContactOutcome {
    pub fn is_contact(self) -> bool {
        !matches!(self, ContactOutcome::Separate)
    }
}

/// Check `a` against `b` and resolve the contact if they overlap.
pub fn resolve_collision(
    a: &mut Body,
    b: &mut Body,
    boundary: &Boundary,
    policy: &EnginePolicy,
) -> ContactOutcome {
    let delta = b.position - a.position;
    let distance = delta.length();
    if distance >= a.radius + b.radius {
        return ContactOutcome::Separate;
    }

    grow(a, boundary, policy);
    grow(b, boundary, policy);

    match policy.impulse {
        ImpulseModel::SwapVelocities => {
            std::mem::swap(&mut a.velocity, &mut b.velocity);
            ContactOutcome::Touching { impulse: true }
        }
        ImpulseModel::ApproachImpulse => {
            if distance < DEGENERATE_DISTANCE {
                return ContactOutcome::Coincident;
            }
            let normal = delta / distance;
            let dot = (a.velocity - b.velocity).dot(normal);
            // Separating pairs are left alone so an overlap does not re-fire
            // every frame while the bodies drift apart.
            if dot <= 0.0 {
                return ContactOutcome::Touching { impulse: false };
            }

            let impulse = 2.0 * dot / (a.radius + b.radius);
            a.velocity -= normal * impulse * b.radius;
            b.velocity += normal * impulse * a.radius;

            a.velocity *= policy.collision_boost;
            b.velocity *= policy.collision_boost;

            if let Some(cap) = a.speed_cap(policy) {
                a.clamp_speed(cap);
            }
            if let Some(cap) = b.speed_cap(policy) {
                b.clamp_speed(cap);
            }
            ContactOutcome::Touching { impulse: true }
        }
    }
}

fn grow(body: &mut Body, boundary: &Boundary, policy: &EnginePolicy) {
    let grown = body.radius + policy.growth;
    if !policy.bounded_growth || boundary.fits(body.position, grown) {
        body.radius = grown;
    }
}
