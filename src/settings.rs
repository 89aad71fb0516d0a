//! Designer-facing locomotion settings.
//!
//! Settings deserialise from JSON with every field optional; missing fields
//! take the defaults from [`crate::constants`]. Nothing is checked during
//! deserialisation. Call [`LocomotionSettings::validate`], or load through
//! [`LocomotionSettings::from_json_str`] / [`LocomotionSettings::from_path`],
//! which validate for you.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALLOWED_ANGLE_ERROR, DEFAULT_ALLOWED_STEERING_ANGLE, DEFAULT_CAPSULE_HEIGHT,
    DEFAULT_CAPSULE_RADIUS, DEFAULT_DETECTION_DISTANCE, DEFAULT_MAX_AVOIDANCE_ITERATIONS,
    DEFAULT_MINIMUM_SURFACE_ANGLE, DEFAULT_TIME_TO_STOP, DEFAULT_TIME_TO_TOP_SPEED,
    DEFAULT_TOP_SPEED,
};
use crate::easing::EasingProfile;
use crate::error::{ConfigError, SettingsError};

/// Which velocity controller drives the character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityStrategy {
    /// Blend along the straight line between current and target velocity,
    /// decelerating to the turning point before accelerating.
    #[default]
    TurningPoint,
    /// Track a sticky main direction and shape the along and perpendicular
    /// speeds independently.
    MainDirection,
}

/// Complete configuration of one character's locomotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Top speed in world units per second.
    pub top_speed: f64,
    /// Seconds needed to reach top speed from rest.
    pub time_to_top_speed: f64,
    /// Shape of the acceleration curve.
    pub acceleration_profile: EasingProfile,
    /// Seconds needed to stop from top speed.
    pub time_to_stop: f64,
    /// Shape of the deceleration curve.
    pub deceleration_profile: EasingProfile,
    /// Velocity controller to use.
    pub strategy: VelocityStrategy,
    /// Obstacle avoidance tuning.
    pub avoidance: AvoidanceSettings,
    /// Collision capsule used when casting for obstacles.
    pub shape: CharacterShape,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            top_speed: DEFAULT_TOP_SPEED,
            time_to_top_speed: DEFAULT_TIME_TO_TOP_SPEED,
            acceleration_profile: EasingProfile::CubicOut,
            time_to_stop: DEFAULT_TIME_TO_STOP,
            deceleration_profile: EasingProfile::QuadraticIn,
            strategy: VelocityStrategy::default(),
            avoidance: AvoidanceSettings::default(),
            shape: CharacterShape::default(),
        }
    }
}

impl LocomotionSettings {
    /// Checks every value that would make the curves or the search
    /// ill-defined.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.top_speed) {
            return Err(ConfigError::NonPositiveTopSpeed(self.top_speed));
        }
        for duration in [self.time_to_top_speed, self.time_to_stop] {
            if !is_positive(duration) {
                return Err(ConfigError::NonPositiveDuration(duration));
            }
        }
        self.shape.validate()?;
        self.avoidance.validate()
    }

    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::Invalid`] for out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use stride::settings::LocomotionSettings;
    ///
    /// let settings = LocomotionSettings::from_json_str(r#"{ "top_speed": 8.0 }"#).unwrap();
    /// assert_eq!(settings.top_speed, 8.0);
    /// assert!(LocomotionSettings::from_json_str(r#"{ "top_speed": 0.0 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates settings from a JSON file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// as [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| SettingsError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Obstacle avoidance tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceSettings {
    /// Whether the search runs at all.
    pub enabled: bool,
    /// Input must meet a surface at more than this angle from head-on before
    /// the controller steers around it.
    pub minimum_surface_angle: f64,
    /// Largest total deflection from the intended direction.
    pub allowed_steering_angle: f64,
    /// Extra deflection added to every increment. Larger values take fewer
    /// iterations.
    pub allowed_angle_error: f64,
    /// Look-ahead added to the stopping distance when casting.
    pub detection_distance: f64,
    /// Upper bound on re-casts per step.
    pub max_iterations: u32,
    /// Collision layers treated as obstacles.
    pub obstacle_layers: u32,
}

impl Default for AvoidanceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum_surface_angle: DEFAULT_MINIMUM_SURFACE_ANGLE,
            allowed_steering_angle: DEFAULT_ALLOWED_STEERING_ANGLE,
            allowed_angle_error: DEFAULT_ALLOWED_ANGLE_ERROR,
            detection_distance: DEFAULT_DETECTION_DISTANCE,
            max_iterations: DEFAULT_MAX_AVOIDANCE_ITERATIONS,
            obstacle_layers: u32::MAX,
        }
    }
}

impl AvoidanceSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        check_angle("minimum_surface_angle", self.minimum_surface_angle, 90.0)?;
        check_angle("allowed_steering_angle", self.allowed_steering_angle, 180.0)?;
        check_angle("allowed_angle_error", self.allowed_angle_error, 90.0)?;
        if !(self.detection_distance.is_finite() && self.detection_distance >= 0.0) {
            return Err(ConfigError::NegativeDistance {
                name: "detection_distance",
                value: self.detection_distance,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}

/// Vertical capsule that approximates the character's collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterShape {
    /// Capsule radius.
    pub radius: f64,
    /// Distance between the two hemisphere centres.
    pub height: f64,
    /// Height of the capsule centre above the body position.
    pub center_offset: f64,
}

impl Default for CharacterShape {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CAPSULE_RADIUS,
            height: DEFAULT_CAPSULE_HEIGHT,
            center_offset: 0.0,
        }
    }
}

impl CharacterShape {
    const fn validate(&self) -> Result<(), ConfigError> {
        let valid = is_positive(self.radius)
            && self.height.is_finite()
            && self.height >= 0.0
            && self.center_offset.is_finite();
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidShape {
                radius: self.radius,
                height: self.height,
            })
        }
    }
}

const fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_angle(name: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAngle {
            name,
            value,
            min: 0.0,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        let settings = LocomotionSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.strategy, VelocityStrategy::TurningPoint);
        assert_eq!(settings.acceleration_profile, EasingProfile::CubicOut);
        assert_eq!(settings.deceleration_profile, EasingProfile::QuadraticIn);
    }

    #[rstest]
    #[case::top_speed(
        LocomotionSettings { top_speed: -1.0, ..LocomotionSettings::default() },
        ConfigError::NonPositiveTopSpeed(-1.0)
    )]
    #[case::time_to_stop(
        LocomotionSettings { time_to_stop: 0.0, ..LocomotionSettings::default() },
        ConfigError::NonPositiveDuration(0.0)
    )]
    #[case::shape(
        LocomotionSettings {
            shape: CharacterShape { radius: 0.0, ..CharacterShape::default() },
            ..LocomotionSettings::default()
        },
        ConfigError::InvalidShape { radius: 0.0, height: DEFAULT_CAPSULE_HEIGHT }
    )]
    #[case::surface_angle(
        LocomotionSettings {
            avoidance: AvoidanceSettings { minimum_surface_angle: 95.0, ..AvoidanceSettings::default() },
            ..LocomotionSettings::default()
        },
        ConfigError::InvalidAngle { name: "minimum_surface_angle", value: 95.0, min: 0.0, max: 90.0 }
    )]
    #[case::iterations(
        LocomotionSettings {
            avoidance: AvoidanceSettings { max_iterations: 0, ..AvoidanceSettings::default() },
            ..LocomotionSettings::default()
        },
        ConfigError::ZeroIterations
    )]
    fn validate_reports_first_problem(
        #[case] settings: LocomotionSettings,
        #[case] expected: ConfigError,
    ) {
        assert_eq!(settings.validate(), Err(expected));
    }

    #[rstest]
    fn partial_json_fills_defaults() {
        let settings = LocomotionSettings::from_json_str(
            r#"{
                "acceleration_profile": "sine_out",
                "strategy": "main_direction",
                "avoidance": { "enabled": false }
            }"#,
        )
        .expect("settings should parse");
        assert_eq!(settings.acceleration_profile, EasingProfile::SineOut);
        assert_eq!(settings.strategy, VelocityStrategy::MainDirection);
        assert!(!settings.avoidance.enabled);
        assert_eq!(settings.avoidance.max_iterations, DEFAULT_MAX_AVOIDANCE_ITERATIONS);
        assert_eq!(settings.top_speed, DEFAULT_TOP_SPEED);
    }

    #[rstest]
    fn unknown_profile_is_a_parse_error() {
        let err = LocomotionSettings::from_json_str(r#"{ "deceleration_profile": "bounce" }"#)
            .expect_err("profile should be rejected");
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[rstest]
    fn negative_detection_distance_is_invalid() {
        let err = LocomotionSettings::from_json_str(
            r#"{ "avoidance": { "detection_distance": -0.1 } }"#,
        )
        .expect_err("distance should be rejected");
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigError::NegativeDistance { .. })
        ));
    }
}
