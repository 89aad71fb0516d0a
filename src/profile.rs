//! Binding of the configured profiles to scaled curves.
//!
//! The acceleration curve rises from rest to top speed over
//! `time_to_top_speed`. The deceleration curve uses the same speed axis over
//! `time_to_stop`; controllers walk it backwards to slow down.

use log::debug;

use crate::curve::ScaledCurve;
use crate::error::ConfigError;
use crate::settings::LocomotionSettings;

/// The curves a controller evaluates every step.
#[derive(Debug, Clone, Copy)]
pub struct ProfileBinding {
    top_speed: f64,
    acceleration: ScaledCurve,
    deceleration: ScaledCurve,
}

impl ProfileBinding {
    /// Resolves the profile selections in `settings` into scaled curves.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the top speed or either duration is
    /// not positive.
    pub fn bind(settings: &LocomotionSettings) -> Result<Self, ConfigError> {
        if !(settings.top_speed.is_finite() && settings.top_speed > 0.0) {
            return Err(ConfigError::NonPositiveTopSpeed(settings.top_speed));
        }
        let acceleration = ScaledCurve::new(
            settings.acceleration_profile,
            settings.time_to_top_speed,
            settings.top_speed,
        )?;
        let deceleration = ScaledCurve::new(
            settings.deceleration_profile,
            settings.time_to_stop,
            settings.top_speed,
        )?;
        Ok(Self {
            top_speed: settings.top_speed,
            acceleration,
            deceleration,
        })
    }

    /// Re-resolves the curves after a settings change.
    ///
    /// The binding is only replaced when the new settings bind cleanly; on
    /// error the previous curves stay in effect.
    ///
    /// # Errors
    /// As [`Self::bind`].
    pub fn rebind(&mut self, settings: &LocomotionSettings) -> Result<(), ConfigError> {
        let bound = Self::bind(settings)?;
        debug!(
            "rebound curves: acceleration {} over {}s, deceleration {} over {}s",
            bound.acceleration.profile(),
            bound.acceleration.duration(),
            bound.deceleration.profile(),
            bound.deceleration.duration(),
        );
        *self = bound;
        Ok(())
    }

    /// Top speed both curves are scaled to.
    #[must_use]
    pub const fn top_speed(&self) -> f64 {
        self.top_speed
    }

    /// Speed over time while accelerating from rest.
    #[must_use]
    pub const fn acceleration(&self) -> &ScaledCurve {
        &self.acceleration
    }

    /// Speed over time remaining before rest while decelerating.
    #[must_use]
    pub const fn deceleration(&self) -> &ScaledCurve {
        &self.deceleration
    }

    /// Distance travelled while braking from `speed` to rest.
    ///
    /// # Examples
    /// ```
    /// use stride::profile::ProfileBinding;
    /// use stride::settings::LocomotionSettings;
    ///
    /// let binding = ProfileBinding::bind(&LocomotionSettings::default()).unwrap();
    /// assert_eq!(binding.stopping_distance(0.0), 0.0);
    /// assert!(binding.stopping_distance(6.0) > binding.stopping_distance(3.0));
    /// ```
    #[must_use]
    pub fn stopping_distance(&self, speed: f64) -> f64 {
        let curve = &self.deceleration;
        curve.curve_integral(curve.curve_inverse(speed))
    }
}
