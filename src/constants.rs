//! Tuning defaults and numeric thresholds shared by the locomotion systems.
//!
//! Designer-facing values are the defaults used by
//! [`LocomotionSettings`](crate::settings::LocomotionSettings); the remaining
//! constants guard the geometry helpers against degenerate input.

/// Default top speed in world units per second.
pub const DEFAULT_TOP_SPEED: f64 = 6.0;
/// Default time, in seconds, to reach top speed from rest.
pub const DEFAULT_TIME_TO_TOP_SPEED: f64 = 0.4;
/// Default time, in seconds, to come to rest from top speed.
pub const DEFAULT_TIME_TO_STOP: f64 = 0.25;

/// Default minimum angle, in degrees, between input and surface before the
/// controller steers around an obstacle.
pub const DEFAULT_MINIMUM_SURFACE_ANGLE: f64 = 30.0;
/// Default steering budget in degrees.
pub const DEFAULT_ALLOWED_STEERING_ANGLE: f64 = 45.0;
/// Default extra deflection, in degrees, added to every avoidance increment.
pub const DEFAULT_ALLOWED_ANGLE_ERROR: f64 = 2.0;
/// Default look-ahead added to the stopping distance when casting.
pub const DEFAULT_DETECTION_DISTANCE: f64 = 0.5;
/// Default cap on shape-cast re-queries per tick.
pub const DEFAULT_MAX_AVOIDANCE_ITERATIONS: u32 = 32;

/// Default capsule radius of a character.
pub const DEFAULT_CAPSULE_RADIUS: f64 = 0.4;
/// Default capsule height of a character.
pub const DEFAULT_CAPSULE_HEIGHT: f64 = 1.8;
/// Scale applied to the capsule radius when casting.
///
/// Slightly smaller than the collider so obstacles already touching the
/// capsule are still reported by the cast.
pub const CAST_RADIUS_SCALE: f64 = 0.99;

/// Squared length below which a direction is treated as zero.
pub const DIRECTION_EPSILON_SQUARED: f64 = 1e-12;
/// Speeds below this magnitude are treated as rest.
pub const SPEED_EPSILON: f64 = 1e-9;
