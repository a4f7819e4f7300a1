//! Headless tests for the engine and its Bevy systems.
//!
//! Long runs check the invariants that must hold on every frame; the Bevy
//! tests drive the systems through a bare [`World`] + [`Schedule`] so no
//! window, renderer, or fixed-timestep clock is involved.

use bevy::math::DVec2;
use bevy::prelude::*;
use ringbounce::body::Body;
use ringbounce::boundary::Boundary;
use ringbounce::config::{ScatterConfig, SimConfig};
use ringbounce::policy::{EnginePolicy, Variant};
use ringbounce::scenario::build_simulation;
use ringbounce::simulation::{advance_simulation_system, record_display_list_system, Simulation};
use ringbounce::surface::{DisplayList, DrawCommand};

const EPS: f64 = 1e-9;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn crowded(variant: Variant) -> Simulation {
    let config = SimConfig {
        variant,
        scatter: Some(ScatterConfig {
            count: 12,
            seed: 1234,
            ..ScatterConfig::default()
        }),
        ..SimConfig::default()
    };
    build_simulation(&config).expect("crowded scene should build")
}

fn world_with(sim: Simulation) -> World {
    let mut world = World::new();
    world.insert_resource(sim);
    world.insert_resource(DisplayList::default());
    world
}

// ── Invariants over long runs ─────────────────────────────────────────────────

#[test]
fn enhanced_bodies_stay_inside_the_boundary() {
    let mut sim = crowded(Variant::Enhanced);
    for frame in 0..2000 {
        sim.step();
        let boundary = *sim.boundary();
        for (i, b) in sim.bodies().iter().enumerate() {
            let pen = boundary.penetration(b.position, b.radius);
            assert!(pen <= EPS, "frame {frame}: body {i} pokes out by {pen}");
        }
    }
}

#[test]
fn enhanced_speeds_respect_the_cap() {
    let mut sim = crowded(Variant::Enhanced);
    for frame in 0..2000 {
        sim.step();
        for (i, b) in sim.bodies().iter().enumerate() {
            let cap = b.speed_cap(sim.policy()).unwrap();
            assert!(
                b.speed() <= cap + EPS,
                "frame {frame}: body {i} speed {} > {cap}",
                b.speed()
            );
        }
    }
}

#[test]
fn radii_never_shrink_in_either_variant() {
    for variant in [Variant::Simple, Variant::Enhanced] {
        let mut sim = crowded(variant);
        let mut previous: Vec<f64> = sim.bodies().iter().map(|b| b.radius).collect();
        for _ in 0..1000 {
            sim.step();
            for (b, before) in sim.bodies().iter().zip(&previous) {
                assert!(b.radius >= *before, "{variant:?}: radius shrank");
            }
            previous = sim.bodies().iter().map(|b| b.radius).collect();
        }
    }
}

#[test]
fn enhanced_run_stays_finite() {
    let mut sim = crowded(Variant::Enhanced);
    for _ in 0..3000 {
        sim.step();
    }
    assert_eq!(sim.stats().non_finite, 0);
    assert!(sim.bodies().iter().all(Body::is_finite));
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn two_overlapping_bodies_grow_to_31() {
    let boundary = Boundary::new(DVec2::new(600.0, 340.0), 300.0).unwrap();
    for policy in [EnginePolicy::simple(), EnginePolicy::enhanced()] {
        let a = Body::new(DVec2::new(575.0, 340.0), 30.0, "red", DVec2::ZERO);
        let b = Body::new(DVec2::new(625.0, 340.0), 30.0, "blue", DVec2::ZERO);
        let mut sim = Simulation::new(vec![a, b], boundary, policy).unwrap();
        sim.step();
        assert_eq!(sim.bodies()[0].radius, 31.0);
        assert_eq!(sim.bodies()[1].radius, 31.0);
    }
}

#[test]
fn simple_gravity_adds_one_over_ten_steps() {
    let boundary = Boundary::new(DVec2::new(600.0, 340.0), 300.0).unwrap();
    let body = Body::new(DVec2::new(600.0, 300.0), 20.0, "green", DVec2::new(1.0, -0.5));
    let mut sim = Simulation::new(vec![body], boundary, EnginePolicy::simple()).unwrap();
    for _ in 0..10 {
        sim.step();
    }
    let vy = sim.bodies()[0].velocity.y;
    assert!((vy - 0.5).abs() < EPS, "vy = {vy}");
}

#[test]
fn pair_order_follows_insertion_order() {
    // Three mutually overlapping bodies: (0,1) swaps first, then (0,2), then (1,2).
    let boundary = Boundary::new(DVec2::ZERO, 300.0).unwrap();
    let bodies = vec![
        Body::new(DVec2::new(-10.0, 0.0), 30.0, "red", DVec2::ZERO),
        Body::new(DVec2::new(10.0, 0.0), 30.0, "blue", DVec2::ZERO),
        Body::new(DVec2::new(0.0, 10.0), 30.0, "green", DVec2::ZERO),
    ];
    let policy = EnginePolicy {
        gravity: 0.0,
        ..EnginePolicy::simple()
    };
    let mut sim = Simulation::new(bodies, boundary, policy).unwrap();
    sim.step();
    assert_eq!(sim.stats().contacts, 3);
    // Every body touched two others.
    assert!(sim.bodies().iter().all(|b| b.radius == 32.0));
}

// ── Bevy systems ──────────────────────────────────────────────────────────────

#[test]
fn advance_system_steps_the_resource() {
    let mut world = world_with(build_simulation(&SimConfig::default()).unwrap());

    let mut schedule = Schedule::default();
    schedule.add_systems(advance_simulation_system);
    for _ in 0..5 {
        schedule.run(&mut world);
    }

    assert_eq!(world.resource::<Simulation>().stats().frame, 5);
}

#[test]
fn record_system_rebuilds_the_display_list_each_frame() {
    let mut world = world_with(build_simulation(&SimConfig::default()).unwrap());

    let mut schedule = Schedule::default();
    schedule.add_systems((advance_simulation_system, record_display_list_system).chain());
    schedule.run(&mut world);
    schedule.run(&mut world);

    let list = world.resource::<DisplayList>();
    assert_eq!(list.commands.len(), 4, "one stroke plus three fills");
    assert!(matches!(list.commands[0], DrawCommand::Stroke { .. }));

    let sim = world.resource::<Simulation>();
    match &list.commands[1] {
        DrawCommand::Fill { center, radius, .. } => {
            assert_eq!(*center, sim.bodies()[0].position);
            assert_eq!(*radius, sim.bodies()[0].radius);
        }
        other => panic!("expected a fill, got {other:?}"),
    }
}
