//! Initial body layouts and the startup system that builds the [`Simulation`].

use bevy::math::DVec2;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::Body;
use crate::boundary::Boundary;
use crate::config::{BodyConfig, ScatterConfig, SimConfig};
use crate::error::SimResult;
use crate::policy::Variant;
use crate::simulation::Simulation;

/// Colors cycled through by [`scatter_bodies`].
const SCATTER_PALETTE: &[&str] = &[
    "gold",
    "orchid",
    "seagreen",
    "tomato",
    "steelblue",
    "orange",
];

/// The three-body opening used by each variant.
///
/// Enhanced bodies carry no cap of their own; they inherit the policy's.
pub fn preset_bodies(variant: Variant, center: DVec2) -> Vec<Body> {
    let left = center - DVec2::new(100.0, 0.0);
    let right = center + DVec2::new(100.0, 0.0);
    let top = center - DVec2::new(0.0, 100.0);
    match variant {
        Variant::Simple => vec![
            Body::new(left, 30.0, "red", DVec2::new(4.0, 4.0)),
            Body::new(right, 30.0, "blue", DVec2::new(-4.0, 3.0)),
            Body::new(top, 30.0, "green", DVec2::new(2.0, -3.6)),
        ],
        Variant::Enhanced => vec![
            Body::new(left, 30.0, "chocolate", DVec2::new(6.0, 6.0)),
            Body::new(right, 30.0, "crimson", DVec2::new(-5.0, 5.0)),
            Body::new(top, 30.0, "skyblue", DVec2::new(4.0, -4.0)),
        ],
    }
}

/// Bodies from `[[bodies]]` entries, placed relative to `center`.
pub fn configured_bodies(entries: &[BodyConfig], center: DVec2) -> Vec<Body> {
    entries
        .iter()
        .map(|e| Body {
            position: center + DVec2::from_array(e.offset),
            velocity: DVec2::from_array(e.velocity),
            radius: e.radius,
            color: e.color.clone(),
            max_speed: e.max_speed,
            gravity: e.gravity,
        })
        .collect()
}

/// `count` random bodies fully inside `boundary`, reproducible from `seed`.
pub fn scatter_bodies(scatter: &ScatterConfig, boundary: &Boundary) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(scatter.seed);
    let max_radius = scatter
        .max_radius
        .max(scatter.min_radius)
        .min(boundary.radius() * 0.5);
    let min_radius = scatter.min_radius.min(max_radius);
    let speed = scatter.max_initial_speed.abs();

    (0..scatter.count)
        .map(|i| {
            let radius = if max_radius > min_radius {
                rng.gen_range(min_radius..=max_radius)
            } else {
                max_radius
            };
            // sqrt keeps the placement uniform over the disc's area; the one
            // unit margin absorbs rounding at the rim.
            let room = (boundary.radius() - radius - 1.0).max(0.0);
            let reach = room * rng.gen::<f64>().sqrt();
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let position = boundary.center() + DVec2::from_angle(angle) * reach;
            let velocity = if speed > 0.0 {
                DVec2::new(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed))
            } else {
                DVec2::ZERO
            };
            Body::new(
                position,
                radius,
                SCATTER_PALETTE[i % SCATTER_PALETTE.len()],
                velocity,
            )
        })
        .collect()
}

/// Assemble the full starting state described by `config`.
pub fn build_simulation(config: &SimConfig) -> SimResult<Simulation> {
    let boundary = Boundary::centered_in(
        config.display_width,
        config.display_height,
        config.boundary_radius,
    )?;

    let mut bodies = if config.bodies.is_empty() {
        preset_bodies(config.variant, boundary.center())
    } else {
        configured_bodies(&config.bodies, boundary.center())
    };
    if let Some(scatter) = &config.scatter {
        bodies.extend(scatter_bodies(scatter, &boundary));
    }

    Simulation::new(bodies, boundary, config.engine_policy())
}

/// Startup system: build the [`Simulation`] resource and set the fixed tick.
///
/// An invalid configuration is logged and replaced by the compiled defaults
/// for the same variant, so the window always opens on something.
pub fn spawn_simulation(mut commands: Commands, config: Res<SimConfig>) {
    let sim = match build_simulation(&config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Invalid simulation config: {e}; falling back to the default scene");
            let fallback = SimConfig {
                variant: config.variant,
                ..SimConfig::default()
            };
            match build_simulation(&fallback) {
                Ok(sim) => sim,
                Err(e) => {
                    error!("Default scene failed to build: {e}");
                    return;
                }
            }
        }
    };

    let hz = if config.steps_per_second > 0.0 {
        config.steps_per_second
    } else {
        warn!(
            "steps_per_second = {} is not positive; using 60",
            config.steps_per_second
        );
        60.0
    };
    commands.insert_resource(Time::<Fixed>::from_hz(hz));

    info!(
        "Simulation ready: {} bodies, boundary r={} at {:?}, variant {:?}",
        sim.bodies().len(),
        sim.boundary().radius(),
        sim.boundary().center(),
        config.variant
    );
    commands.insert_resource(sim);
}
