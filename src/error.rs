//! Simulation-specific error types.
//!
//! Construction and configuration paths return these types instead of
//! panicking.  Stepping itself is total: a malformed body simply renders
//! oddly next frame, so nothing in [`crate::simulation::Simulation::step`]
//! returns an error.
//!
//! ## Usage
//!
//! ```rust
//! use ringbounce::error::{validate_radius, SimResult};
//!
//! fn check(radius: f64) -> SimResult<()> {
//!     validate_radius("bodies[0].radius", radius)?;
//!     Ok(())
//! }
//! # assert!(check(30.0).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the ring simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A body or boundary radius is zero, negative, or not finite.
    InvalidRadius {
        /// Which value was rejected (for logging).
        context: String,
        /// The rejected radius.
        value: f64,
    },

    /// A position or velocity component is NaN or infinite.
    NonFiniteState {
        /// Index of the offending body.
        body: usize,
        /// Which field was non-finite.
        field: &'static str,
    },

    /// A body starts with part of its footprint outside the boundary.
    OutsideBoundary {
        /// Index of the offending body.
        body: usize,
        /// `distance + radius - boundary_radius`.
        overlap: f64,
    },

    /// A body starts faster than its own speed cap.
    SpeedAboveCap {
        /// Index of the offending body.
        body: usize,
        speed: f64,
        cap: f64,
    },

    /// A policy constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The configuration file could not be parsed.
    Config {
        /// Path of the file that failed.
        path: String,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRadius { context, value } => {
                write!(f, "radius '{}' = {} must be finite and > 0", context, value)
            }
            SimError::NonFiniteState { body, field } => {
                write!(f, "body {} has a non-finite {}", body, field)
            }
            SimError::OutsideBoundary { body, overlap } => write!(
                f,
                "body {} starts {:.3} units outside the boundary",
                body, overlap
            ),
            SimError::SpeedAboveCap { body, speed, cap } => write!(
                f,
                "body {} starts at speed {:.3}, above its cap of {}",
                body, speed, cap
            ),
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::Config { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_radius(context: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRadius {
            context: context.to_string(),
            value,
        })
    }
}

/// Returns an error if `gravity` is negative or not finite.
///
/// Zero switches gravity off.
pub fn validate_gravity(value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "gravity",
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if a speed cap is not strictly positive.
pub fn validate_max_speed(value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "max_speed",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if a velocity multiplier would flip or zero velocities.
pub fn validate_multiplier(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if the per-contact growth would shrink bodies.
pub fn validate_growth(value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "growth",
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_must_be_positive_and_finite() {
        assert!(validate_radius("r", 1.0).is_ok());
        assert!(validate_radius("r", 0.0).is_err());
        assert!(validate_radius("r", -3.0).is_err());
        assert!(validate_radius("r", f64::NAN).is_err());
    }

    #[test]
    fn zero_gravity_is_allowed() {
        assert!(validate_gravity(0.0).is_ok());
        assert!(validate_gravity(-0.1).is_err());
    }

    #[test]
    fn shrinking_growth_is_rejected() {
        assert!(validate_growth(0.0).is_ok());
        assert!(validate_growth(-1.0).is_err());
    }

    #[test]
    fn display_names_the_constant() {
        let err = validate_max_speed(0.0).unwrap_err();
        assert!(err.to_string().contains("max_speed"));
    }
}
