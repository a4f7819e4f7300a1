//! Centralised physics and display constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::SimConfig::default`] reads every
//! default from this file, and `assets/sim.toml` can override any of them at
//! startup without a rebuild.

// ── Display ───────────────────────────────────────────────────────────────────

/// Logical width of the drawing area (canvas units, y grows downward).
///
/// The boundary center sits at `(DISPLAY_WIDTH / 2, DISPLAY_HEIGHT / 2)`.
pub const DISPLAY_WIDTH: f64 = 1200.0;

/// Logical height of the drawing area.
pub const DISPLAY_HEIGHT: f64 = 680.0;

/// Radius of the containing circle.
pub const BOUNDARY_RADIUS: f64 = 300.0;

// ── Physics: Integration ──────────────────────────────────────────────────────

/// Downward velocity added every step by the simple variant.
///
/// Accumulates with no terminal velocity; only boundary contacts bleed it off.
/// After 10 contact-free steps `velocity.y` has grown by exactly 1.0.
pub const GRAVITY: f64 = 0.1;

/// Simulation steps per second driven by the host's fixed schedule.
///
/// Each step is one unit of simulation time, so this is purely a playback rate.
pub const STEPS_PER_SECOND: f64 = 60.0;

// ── Physics: Boundary ─────────────────────────────────────────────────────────

/// Outward-speed multiplier applied on boundary contact by the enhanced variant.
///
/// Values above 1.0 inject energy on every bounce; `MAX_SPEED` keeps it finite.
pub const BOUNCE_GAIN: f64 = 1.2;

/// Speed cap for bodies in the enhanced variant.
pub const MAX_SPEED: f64 = 10.0;

// ── Physics: Contacts ─────────────────────────────────────────────────────────

/// Radius increment applied to each body of a touching pair.
pub const GROWTH_PER_CONTACT: f64 = 1.0;

/// Velocity multiplier applied to both bodies after an approach impulse.
pub const COLLISION_BOOST: f64 = 1.1;

/// Center separations below this are treated as coincident (no contact normal).
pub const DEGENERATE_DISTANCE: f64 = f64::EPSILON;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Stroke color tag for the boundary outline.
pub const BOUNDARY_COLOR: &str = "white";

/// Triangle-fan segment count for the unit disc mesh used to fill bodies.
pub const DISC_SEGMENTS: usize = 64;

/// Font size for the stats overlay text.
pub const STATS_FONT_SIZE: f32 = 16.0;
