//! The body simulation engine and its Bevy plugin.
//!
//! ## Frame order
//!
//! 1. For each body in insertion order: [`Body::integrate`], then
//!    [`Body::resolve_boundary`].
//! 2. For each unordered pair `(i, j)` with `i < j`: [`resolve_collision`].
//!
//! The pair pass is a single sweep with no re-check, so one resolved pair can
//! leave a later pair slightly overlapping until the next step.

use bevy::prelude::*;

use crate::body::Body;
use crate::boundary::Boundary;
use crate::collision::{resolve_collision, ContactOutcome};
use crate::constants::BOUNDARY_COLOR;
use crate::error::{
    validate_gravity, validate_max_speed, validate_radius, SimError, SimResult,
};
use crate::policy::EnginePolicy;
use crate::surface::{DisplayList, DrawSurface};

/// Counters describing the most recent step plus running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Steps taken so far.
    pub frame: u64,
    /// Boundary contacts resolved in the last step.
    pub boundary_hits: usize,
    /// Body-body contacts resolved in the last step.
    pub contacts: usize,
    pub total_contacts: u64,
    /// Pairs whose centers coincided, so no contact normal existed.
    pub skipped_degenerate: u64,
    /// Bodies currently holding a NaN or infinite value.
    pub non_finite: usize,
}

/// Ordered bodies inside one boundary, advanced by [`Simulation::step`].
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    boundary: Boundary,
    policy: EnginePolicy,
    stats: FrameStats,
}

impl Simulation {
    /// Build a simulation after validating the policy and every body.
    pub fn new(bodies: Vec<Body>, boundary: Boundary, policy: EnginePolicy) -> SimResult<Self> {
        policy.validate()?;
        for (i, body) in bodies.iter().enumerate() {
            validate_radius(&format!("bodies[{i}].radius"), body.radius)?;
            if !body.position.is_finite() {
                return Err(SimError::NonFiniteState {
                    body: i,
                    field: "position",
                });
            }
            if !body.velocity.is_finite() {
                return Err(SimError::NonFiniteState {
                    body: i,
                    field: "velocity",
                });
            }
            let overlap = boundary.penetration(body.position, body.radius);
            if overlap > 0.0 {
                return Err(SimError::OutsideBoundary { body: i, overlap });
            }
            if let Some(gravity) = body.gravity {
                validate_gravity(gravity)?;
            }
            if let Some(cap) = body.max_speed {
                validate_max_speed(cap)?;
            }
            if let Some(cap) = body.speed_cap(&policy) {
                let speed = body.speed();
                if speed > cap {
                    return Err(SimError::SpeedAboveCap { body: i, speed, cap });
                }
            }
        }
        Ok(Self {
            bodies,
            boundary,
            policy,
            stats: FrameStats::default(),
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Advance every body by one frame.
    pub fn step(&mut self) {
        let mut boundary_hits = 0;
        for body in &mut self.bodies {
            body.integrate(&self.policy);
            if body.resolve_boundary(&self.boundary, &self.policy) {
                boundary_hits += 1;
            }
        }

        let mut contacts = 0;
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.bodies.split_at_mut(j);
                let outcome =
                    resolve_collision(&mut head[i], &mut tail[0], &self.boundary, &self.policy);
                if outcome.is_contact() {
                    contacts += 1;
                }
                if outcome == ContactOutcome::Coincident {
                    self.stats.skipped_degenerate += 1;
                    debug!(
                        "bodies {} and {} share a center on frame {}; impulse skipped",
                        i, j, self.stats.frame
                    );
                }
            }
        }

        self.stats.frame += 1;
        self.stats.boundary_hits = boundary_hits;
        self.stats.contacts = contacts;
        self.stats.total_contacts += contacts as u64;
        self.stats.non_finite = self.bodies.iter().filter(|b| !b.is_finite()).count();
    }

    /// Outline the boundary, then fill every body in order.
    pub fn render(&self, surface: &mut impl DrawSurface) {
        surface.stroke_circle(
            self.boundary.center(),
            self.boundary.radius(),
            &BOUNDARY_COLOR.into(),
        );
        for body in &self.bodies {
            surface.fill_circle(body.position, body.radius, &body.color);
        }
    }
}

// ── Bevy plugin ───────────────────────────────────────────────────────────────

/// Steps the [`Simulation`] resource on the fixed schedule and records a
/// [`DisplayList`] every rendered frame.
///
/// The `Simulation` resource itself is inserted by a startup system (see
/// [`crate::scenario::spawn_simulation`]); both systems idle until it exists.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplayList>()
            .add_systems(
                FixedUpdate,
                advance_simulation_system.run_if(resource_exists::<Simulation>),
            )
            .add_systems(
                Update,
                record_display_list_system.run_if(resource_exists::<Simulation>),
            );
    }
}

/// One engine step per fixed tick.
pub fn advance_simulation_system(mut sim: ResMut<Simulation>) {
    let before = sim.stats().non_finite;
    sim.step();
    let after = sim.stats().non_finite;
    if after > before {
        warn!(
            "{} bodies hold non-finite state after frame {}",
            after,
            sim.stats().frame
        );
    }
}

/// Rebuild the display list from the current simulation state.
pub fn record_display_list_system(sim: Res<Simulation>, mut list: ResMut<DisplayList>) {
    list.clear();
    sim.render(&mut *list);
}
