//! Ring simulation engine library
//!
//! Circular bodies bounce around inside a fixed circular boundary, swap or
//! exchange momentum when they touch, and grow a little on every contact.
//! The engine is a plain [`simulation::Simulation`] value with `step()` and
//! `render(surface)`; the Bevy plugins only schedule and present it.

pub mod body;
pub mod boundary;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod policy;
pub mod rendering;
pub mod scenario;
pub mod simulation;
pub mod surface;
