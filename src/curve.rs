//! Physical-unit curves built from normalised easing profiles.
//!
//! A [`ScaledCurve`] stretches a [`CurveTriple`] over `duration` seconds and
//! scales it to `peak` speed. Inputs outside the domain saturate: anything at
//! or below zero maps to the resting value and anything at or beyond the end
//! maps to the peak. The curves never extrapolate.

use crate::easing::{CurveTriple, EasingProfile};
use crate::error::ConfigError;

/// An easing profile scaled to a duration and a peak value.
#[derive(Debug, Clone, Copy)]
pub struct ScaledCurve {
    profile: EasingProfile,
    triple: &'static CurveTriple,
    duration: f64,
    peak: f64,
}

impl ScaledCurve {
    /// Binds `profile` to a duration in seconds and a peak value.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonPositiveDuration`] or
    /// [`ConfigError::NonPositivePeak`] when either scale is zero, negative or
    /// not finite.
    ///
    /// # Examples
    /// ```
    /// use stride::curve::ScaledCurve;
    /// use stride::easing::EasingProfile;
    ///
    /// let curve = ScaledCurve::new(EasingProfile::QuadraticIn, 0.5, 6.0).unwrap();
    /// assert_eq!(curve.curve(0.5), 6.0);
    /// assert_eq!(curve.curve(0.25), 1.5);
    /// assert!(ScaledCurve::new(EasingProfile::QuadraticIn, 0.0, 6.0).is_err());
    /// ```
    pub fn new(profile: EasingProfile, duration: f64, peak: f64) -> Result<Self, ConfigError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration(duration));
        }
        if !(peak.is_finite() && peak > 0.0) {
            return Err(ConfigError::NonPositivePeak(peak));
        }
        Ok(Self {
            profile,
            triple: profile.curves(),
            duration,
            peak,
        })
    }

    /// The profile this curve was built from.
    #[must_use]
    pub const fn profile(&self) -> EasingProfile {
        self.profile
    }

    /// Length of the curve's domain in seconds.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Value reached at the end of the domain.
    #[must_use]
    pub const fn peak(&self) -> f64 {
        self.peak
    }

    /// Value of the curve `x` seconds into its domain.
    #[must_use]
    pub fn curve(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= self.duration {
            return self.peak;
        }
        self.peak * self.triple.evaluate(x / self.duration)
    }

    /// Time into the domain at which the curve reaches `y`.
    #[must_use]
    pub fn curve_inverse(&self, y: f64) -> f64 {
        if y <= 0.0 {
            return 0.0;
        }
        if y >= self.peak {
            return self.duration;
        }
        self.duration * self.triple.invert(y / self.peak)
    }

    /// Normalised area under the curve from the start of the domain to `x`.
    ///
    /// The value saturates at `peak · duration` once `x` reaches the end of
    /// the domain.
    #[must_use]
    pub fn curve_integral(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let total = self.peak * self.duration;
        if x >= self.duration {
            return total;
        }
        total * self.triple.integrate(x / self.duration)
    }
}
