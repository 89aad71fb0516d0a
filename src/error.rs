//! Error types raised while binding configuration or querying obstacles.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems detected when curves or settings are bound.
///
/// Computing with any of these values would divide by zero or produce
/// non-finite velocities, so they are reported instead of tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// A curve duration was zero, negative or not finite.
    #[error("curve duration must be positive and finite, got {0}")]
    NonPositiveDuration(f64),
    /// A curve peak was zero, negative or not finite.
    #[error("curve peak must be positive and finite, got {0}")]
    NonPositivePeak(f64),
    /// The configured top speed was zero, negative or not finite.
    #[error("top speed must be positive and finite, got {0}")]
    NonPositiveTopSpeed(f64),
    /// The character capsule has a non-positive radius or negative height.
    #[error("invalid character shape: radius {radius}, height {height}")]
    InvalidShape {
        /// Capsule radius.
        radius: f64,
        /// Capsule height.
        height: f64,
    },
    /// An angle setting lies outside its permitted range.
    #[error("{name} must lie within {min}..={max} degrees, got {value}")]
    InvalidAngle {
        /// Setting name.
        name: &'static str,
        /// Offending value in degrees.
        value: f64,
        /// Lower bound in degrees.
        min: f64,
        /// Upper bound in degrees.
        max: f64,
    },
    /// A distance setting was negative or not finite.
    #[error("{name} must be a finite, non-negative distance, got {value}")]
    NegativeDistance {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The avoidance search was configured with no iterations.
    #[error("obstacle avoidance needs at least one iteration")]
    ZeroIterations,
}

/// Errors raised while loading [`LocomotionSettings`](crate::settings::LocomotionSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for the settings schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// The settings parsed but hold invalid values.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// A profile name that does not exist in the easing catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing profile `{0}`")]
pub struct ParseProfileError(pub String);

/// Failure reported by an [`ObstacleQuery`](crate::avoidance::ObstacleQuery)
/// backend.
///
/// The avoidance search treats these as "no obstacle found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("obstacle query failed: {reason}")]
pub struct QueryError {
    /// Backend-specific description of the failure.
    pub reason: String,
}

impl QueryError {
    /// Builds a query error from any displayable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
