//! Runtime configuration loaded from `assets/sim.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] whose defaults come from
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/sim.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Example
//!
//! ```toml
//! variant = "simple"
//! boundary_radius = 280.0
//!
//! [policy]
//! gravity = 0.05
//!
//! [[bodies]]
//! offset = [-100.0, 0.0]
//! velocity = [4.0, 4.0]
//! radius = 30.0
//! color = "red"
//!
//! [scatter]
//! count = 6
//! seed = 42
//! ```
//!
//! The `RINGBOUNCE_VARIANT` environment variable (`simple` / `enhanced`)
//! overrides `variant` after the file is read.

use std::env;

use bevy::prelude::*;
use serde::Deserialize;

use crate::body::ColorTag;
use crate::constants::*;
use crate::error::{SimError, SimResult};
use crate::policy::{EnginePolicy, ImpulseModel, Variant};

pub const CONFIG_PATH: &str = "assets/sim.toml";
pub const VARIANT_ENV: &str = "RINGBOUNCE_VARIANT";

/// Runtime-tunable simulation and display configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Display ───────────────────────────────────────────────────────────────
    pub display_width: f64,
    pub display_height: f64,
    pub boundary_radius: f64,

    // ── Engine ────────────────────────────────────────────────────────────────
    pub variant: Variant,
    pub policy: PolicyOverrides,
    pub steps_per_second: f64,

    // ── Initial bodies ────────────────────────────────────────────────────────
    /// Explicit starting bodies. Empty means "use the variant's preset".
    pub bodies: Vec<BodyConfig>,
    /// Extra seeded random bodies appended after the explicit/preset ones.
    pub scatter: Option<ScatterConfig>,

    // ── Rendering ─────────────────────────────────────────────────────────────
    pub show_stats: bool,
    pub stats_font_size: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            boundary_radius: BOUNDARY_RADIUS,
            variant: Variant::default(),
            policy: PolicyOverrides::default(),
            steps_per_second: STEPS_PER_SECOND,
            bodies: Vec::new(),
            scatter: None,
            show_stats: true,
            stats_font_size: STATS_FONT_SIZE,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(path: &str, contents: &str) -> SimResult<Self> {
        toml::from_str(contents).map_err(|e| SimError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// The variant preset with any `[policy]` overrides applied.
    pub fn engine_policy(&self) -> EnginePolicy {
        self.policy.apply(self.variant.policy())
    }
}

/// Optional per-rule overrides layered on top of the variant preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyOverrides {
    pub gravity: Option<f64>,
    pub bounce_gain: Option<f64>,
    pub position_correction: Option<bool>,
    /// `false` removes the policy speed cap; per-body caps still apply.
    pub speed_cap: Option<bool>,
    pub max_speed: Option<f64>,
    pub growth: Option<f64>,
    pub bounded_growth: Option<bool>,
    pub impulse: Option<ImpulseModel>,
    pub collision_boost: Option<f64>,
}

impl PolicyOverrides {
    pub fn apply(&self, base: EnginePolicy) -> EnginePolicy {
        EnginePolicy {
            gravity: self.gravity.unwrap_or(base.gravity),
            bounce_gain: self.bounce_gain.unwrap_or(base.bounce_gain),
            position_correction: self
                .position_correction
                .unwrap_or(base.position_correction),
            max_speed: match self.speed_cap {
                Some(false) => None,
                _ => self.max_speed.or(base.max_speed),
            },
            growth: self.growth.unwrap_or(base.growth),
            bounded_growth: self.bounded_growth.unwrap_or(base.bounded_growth),
            impulse: self.impulse.unwrap_or(base.impulse),
            collision_boost: self.collision_boost.unwrap_or(base.collision_boost),
        }
    }
}

/// One explicitly configured starting body.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyConfig {
    /// Position relative to the boundary center (canvas units, y down).
    pub offset: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    pub radius: f64,
    pub color: ColorTag,
    #[serde(default)]
    pub max_speed: Option<f64>,
    #[serde(default)]
    pub gravity: Option<f64>,
}

/// Seeded random body generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub count: usize,
    pub seed: u64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Each velocity component is drawn from `[-max_initial_speed, max_initial_speed]`.
    pub max_initial_speed: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 0,
            seed: 0,
            min_radius: 10.0,
            max_radius: 25.0,
            max_initial_speed: 4.0,
        }
    }
}

/// Startup system: attempt to load `assets/sim.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Parse errors are logged but do not abort the simulation.  A missing file
/// is not an error (defaults are already in place from `insert_resource`).
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match SimConfig::from_toml_str(CONFIG_PATH, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded simulation config from {CONFIG_PATH}");
            }
            Err(e) => warn!("{e}; using defaults"),
        },
        Err(_) => info!("No {CONFIG_PATH} found; using compiled defaults"),
    }

    if let Ok(name) = env::var(VARIANT_ENV) {
        match Variant::parse(&name) {
            Some(variant) => {
                config.variant = variant;
                info!("{VARIANT_ENV} selects the {variant:?} variant");
            }
            None => warn!("Ignoring {VARIANT_ENV}={name:?}; expected 'simple' or 'enhanced'"),
        }
    }
}
