//! Behaviour switches for the engine.
//!
//! The simple and enhanced engines differ only in a handful of rules, so both
//! are expressed as presets of one [`EnginePolicy`] rather than two engines.
//!
//! | Rule                 | Simple            | Enhanced                   |
//! |----------------------|-------------------|----------------------------|
//! | Gravity              | `0.1` per step    | off                        |
//! | Bounce gain          | `1.0`             | `1.2`                      |
//! | Position correction  | off               | on                         |
//! | Speed cap            | none              | `10.0`                     |
//! | Growth bounds check  | off               | on                         |
//! | Impulse model        | swap velocities   | approach impulse + boost   |

use serde::Deserialize;

use crate::constants::*;
use crate::error::{
    validate_gravity, validate_growth, validate_max_speed, validate_multiplier, SimResult,
};

/// Which preset to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Simple,
    #[default]
    Enhanced,
}

impl Variant {
    pub fn policy(self) -> EnginePolicy {
        match self {
            Variant::Simple => EnginePolicy::simple(),
            Variant::Enhanced => EnginePolicy::enhanced(),
        }
    }

    /// Parse `"simple"` / `"enhanced"` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Variant::Simple),
            "enhanced" => Some(Variant::Enhanced),
            _ => None,
        }
    }
}

/// Velocity response for a touching pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseModel {
    /// Exchange the two velocity vectors outright.
    SwapVelocities,
    /// Radius-weighted impulse along the contact normal, only while the
    /// bodies approach, followed by the collision boost and speed cap.
    ApproachImpulse,
}

/// Every rule that differs between the two engine presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnginePolicy {
    /// Added to `velocity.y` every step. Zero disables gravity.
    pub gravity: f64,
    /// Multiplier on the reflected velocity at the boundary.
    pub bounce_gain: f64,
    /// Push a penetrating body back inside along the radial direction.
    pub position_correction: bool,
    /// Cap for bodies that do not carry their own `max_speed`.
    pub max_speed: Option<f64>,
    /// Radius increment per contact.
    pub growth: f64,
    /// Only grow a body if the grown footprint still fits in the boundary.
    pub bounded_growth: bool,
    pub impulse: ImpulseModel,
    /// Multiplier on both velocities after an approach impulse.
    pub collision_boost: f64,
}

impl EnginePolicy {
    pub fn simple() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_gain: 1.0,
            position_correction: false,
            max_speed: None,
            growth: GROWTH_PER_CONTACT,
            bounded_growth: false,
            impulse: ImpulseModel::SwapVelocities,
            collision_boost: 1.0,
        }
    }

    pub fn enhanced() -> Self {
        Self {
            gravity: 0.0,
            bounce_gain: BOUNCE_GAIN,
            position_correction: true,
            max_speed: Some(MAX_SPEED),
            growth: GROWTH_PER_CONTACT,
            bounded_growth: true,
            impulse: ImpulseModel::ApproachImpulse,
            collision_boost: COLLISION_BOOST,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_gravity(self.gravity)?;
        validate_multiplier("bounce_gain", self.bounce_gain)?;
        validate_multiplier("collision_boost", self.collision_boost)?;
        validate_growth(self.growth)?;
        if let Some(cap) = self.max_speed {
            validate_max_speed(cap)?;
        }
        Ok(())
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Variant::default().policy()
    }
}
