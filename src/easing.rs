//! Catalogue of normalised easing profiles.
//!
//! Every [`EasingProfile`] maps to a [`CurveTriple`]: the forward curve over
//! `[0, 1]`, its exact inverse, and its definite integral from zero scaled so
//! the integral over the whole domain is one. The triples are constants, so
//! resolving a profile never allocates or recomputes anything.
//!
//! ```
//! use stride::easing::EasingProfile;
//!
//! let curve = EasingProfile::CubicOut.curves();
//! let y = curve.evaluate(0.25);
//! assert!((curve.invert(y) - 0.25).abs() < 1e-9);
//! assert!((curve.integrate(1.0) - 1.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseProfileError;

/// A named shaping curve from the easing catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingProfile {
    /// `1 - cos(xπ/2)`.
    SineIn,
    /// `sin(xπ/2)`.
    SineOut,
    /// `x³`.
    CubicIn,
    /// `1 - (1 - x)³`.
    CubicOut,
    /// `x⁵`.
    QuinticIn,
    /// `1 - (1 - x)⁵`.
    QuinticOut,
    /// `1 - √(1 - x²)`.
    CircularIn,
    /// `√(1 - (x - 1)²)`.
    CircularOut,
    /// `x²`.
    QuadraticIn,
    /// `1 - (1 - x)²`.
    QuadraticOut,
    /// `x⁴`.
    QuarticIn,
    /// `1 - (1 - x)⁴`.
    QuarticOut,
    /// `2^(10x - 10)`, zero at the origin.
    ExponentialIn,
    /// `1 - 2^(-10x)`, one at the end of the domain.
    ExponentialOut,
}

impl EasingProfile {
    /// Every profile in the catalogue.
    pub const ALL: [Self; 14] = [
        Self::SineIn,
        Self::SineOut,
        Self::CubicIn,
        Self::CubicOut,
        Self::QuinticIn,
        Self::QuinticOut,
        Self::CircularIn,
        Self::CircularOut,
        Self::QuadraticIn,
        Self::QuadraticOut,
        Self::QuarticIn,
        Self::QuarticOut,
        Self::ExponentialIn,
        Self::ExponentialOut,
    ];

    /// Returns the curve functions bound to this profile.
    #[must_use]
    pub const fn curves(self) -> &'static CurveTriple {
        match self {
            Self::SineIn => &SINE_IN,
            Self::SineOut => &SINE_OUT,
            Self::CubicIn => &CUBIC_IN,
            Self::CubicOut => &CUBIC_OUT,
            Self::QuinticIn => &QUINTIC_IN,
            Self::QuinticOut => &QUINTIC_OUT,
            Self::CircularIn => &CIRCULAR_IN,
            Self::CircularOut => &CIRCULAR_OUT,
            Self::QuadraticIn => &QUADRATIC_IN,
            Self::QuadraticOut => &QUADRATIC_OUT,
            Self::QuarticIn => &QUARTIC_IN,
            Self::QuarticOut => &QUARTIC_OUT,
            Self::ExponentialIn => &EXPONENTIAL_IN,
            Self::ExponentialOut => &EXPONENTIAL_OUT,
        }
    }

    /// Whether the profile starts slowly ("in") rather than finishing slowly.
    #[must_use]
    pub const fn is_ease_in(self) -> bool {
        matches!(
            self,
            Self::SineIn
                | Self::CubicIn
                | Self::QuinticIn
                | Self::CircularIn
                | Self::QuadraticIn
                | Self::QuarticIn
                | Self::ExponentialIn
        )
    }

    /// The configuration name of the profile, e.g. `"cubic_out"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SineIn => "sine_in",
            Self::SineOut => "sine_out",
            Self::CubicIn => "cubic_in",
            Self::CubicOut => "cubic_out",
            Self::QuinticIn => "quintic_in",
            Self::QuinticOut => "quintic_out",
            Self::CircularIn => "circular_in",
            Self::CircularOut => "circular_out",
            Self::QuadraticIn => "quadratic_in",
            Self::QuadraticOut => "quadratic_out",
            Self::QuarticIn => "quartic_in",
            Self::QuarticOut => "quartic_out",
            Self::ExponentialIn => "exponential_in",
            Self::ExponentialOut => "exponential_out",
        }
    }
}

impl fmt::Display for EasingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingProfile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.name() == s)
            .ok_or_else(|| ParseProfileError(s.to_owned()))
    }
}

/// The forward, inverse and normalised integral functions of one profile.
///
/// All three are total on `[0, 1]`: inputs are saturated into the domain and
/// outputs into the range before they are returned.
#[derive(Debug, Clone, Copy)]
pub struct CurveTriple {
    forward: fn(f64) -> f64,
    inverse: fn(f64) -> f64,
    integral: fn(f64) -> f64,
}

impl CurveTriple {
    /// Evaluates the curve at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        saturate((self.forward)(saturate(x)))
    }

    /// Returns the `x` at which the curve reaches `y`.
    #[must_use]
    pub fn invert(&self, y: f64) -> f64 {
        saturate((self.inverse)(saturate(y)))
    }

    /// Area under the curve from `0` to `t`, normalised so the full area is one.
    #[must_use]
    pub fn integrate(&self, t: f64) -> f64 {
        saturate((self.integral)(saturate(t)))
    }
}

/// Clamps into `[0, 1]`, mapping NaN to zero.
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

const fn triple(
    forward: fn(f64) -> f64,
    inverse: fn(f64) -> f64,
    integral: fn(f64) -> f64,
) -> CurveTriple {
    CurveTriple {
        forward,
        inverse,
        integral,
    }
}

const SINE_IN: CurveTriple = triple(curves::sine_in, curves::sine_in_inv, curves::sine_in_int);
const SINE_OUT: CurveTriple = triple(curves::sine_out, curves::sine_out_inv, curves::sine_out_int);
const CUBIC_IN: CurveTriple = triple(
    curves::power_in::<3>,
    curves::power_in_inv::<3>,
    curves::power_in_int::<3>,
);
const CUBIC_OUT: CurveTriple = triple(
    curves::power_out::<3>,
    curves::power_out_inv::<3>,
    curves::power_out_int::<3>,
);
const QUINTIC_IN: CurveTriple = triple(
    curves::power_in::<5>,
    curves::power_in_inv::<5>,
    curves::power_in_int::<5>,
);
const QUINTIC_OUT: CurveTriple = triple(
    curves::power_out::<5>,
    curves::power_out_inv::<5>,
    curves::power_out_int::<5>,
);
const CIRCULAR_IN: CurveTriple = triple(curves::circ_in, curves::circ_in_inv, curves::circ_in_int);
const CIRCULAR_OUT: CurveTriple =
    triple(curves::circ_out, curves::circ_out_inv, curves::circ_out_int);
const QUADRATIC_IN: CurveTriple = triple(
    curves::power_in::<2>,
    curves::power_in_inv::<2>,
    curves::power_in_int::<2>,
);
const QUADRATIC_OUT: CurveTriple = triple(
    curves::power_out::<2>,
    curves::power_out_inv::<2>,
    curves::power_out_int::<2>,
);
const QUARTIC_IN: CurveTriple = triple(
    curves::power_in::<4>,
    curves::power_in_inv::<4>,
    curves::power_in_int::<4>,
);
const QUARTIC_OUT: CurveTriple = triple(
    curves::power_out::<4>,
    curves::power_out_inv::<4>,
    curves::power_out_int::<4>,
);
const EXPONENTIAL_IN: CurveTriple = triple(curves::expo_in, curves::expo_in_inv, curves::expo_in_int);
const EXPONENTIAL_OUT: CurveTriple =
    triple(curves::expo_out, curves::expo_out_inv, curves::expo_out_int);

mod curves {
    //! Raw curve functions. Callers saturate inputs into `[0, 1]` first.

    use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, FRAC_PI_4, LN_2};

    /// `2^-10`, the value the exponential-in curve approaches at the origin.
    const EXPO_FLOOR: f64 = 1.0 / 1024.0;

    pub(super) fn power_in<const N: i32>(x: f64) -> f64 {
        x.powi(N)
    }

    pub(super) fn power_in_inv<const N: i32>(y: f64) -> f64 {
        y.powf(1.0 / f64::from(N))
    }

    pub(super) fn power_in_int<const N: i32>(t: f64) -> f64 {
        t.powi(N + 1)
    }

    pub(super) fn power_out<const N: i32>(x: f64) -> f64 {
        1.0 - (1.0 - x).powi(N)
    }

    pub(super) fn power_out_inv<const N: i32>(y: f64) -> f64 {
        1.0 - (1.0 - y).powf(1.0 / f64::from(N))
    }

    // ((n+1)t - 1 + (1-t)^(n+1)) / n
    pub(super) fn power_out_int<const N: i32>(t: f64) -> f64 {
        let n = f64::from(N);
        ((n + 1.0) * t - 1.0 + (1.0 - t).powi(N + 1)) / n
    }

    pub(super) fn sine_in(x: f64) -> f64 {
        1.0 - (x * FRAC_PI_2).cos()
    }

    pub(super) fn sine_in_inv(y: f64) -> f64 {
        (1.0 - y).acos() * FRAC_2_PI
    }

    pub(super) fn sine_in_int(t: f64) -> f64 {
        (t - FRAC_2_PI * (t * FRAC_PI_2).sin()) / (1.0 - FRAC_2_PI)
    }

    pub(super) fn sine_out(x: f64) -> f64 {
        (x * FRAC_PI_2).sin()
    }

    pub(super) fn sine_out_inv(y: f64) -> f64 {
        y.asin() * FRAC_2_PI
    }

    pub(super) fn sine_out_int(t: f64) -> f64 {
        1.0 - (t * FRAC_PI_2).cos()
    }

    pub(super) fn circ_in(x: f64) -> f64 {
        1.0 - (1.0 - x * x).max(0.0).sqrt()
    }

    pub(super) fn circ_in_inv(y: f64) -> f64 {
        let r = 1.0 - y;
        (1.0 - r * r).max(0.0).sqrt()
    }

    pub(super) fn circ_in_int(t: f64) -> f64 {
        let segment = 0.5 * (t * (1.0 - t * t).max(0.0).sqrt() + t.asin());
        (t - segment) / (1.0 - FRAC_PI_4)
    }

    pub(super) fn circ_out(x: f64) -> f64 {
        let u = x - 1.0;
        (1.0 - u * u).max(0.0).sqrt()
    }

    pub(super) fn circ_out_inv(y: f64) -> f64 {
        1.0 - (1.0 - y * y).max(0.0).sqrt()
    }

    pub(super) fn circ_out_int(t: f64) -> f64 {
        let u = t - 1.0;
        let segment = 0.5 * (u * (1.0 - u * u).max(0.0).sqrt() + u.asin());
        (segment + FRAC_PI_4) / FRAC_PI_4
    }

    pub(super) fn expo_in(x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            10.0f64.mul_add(x, -10.0).exp2()
        }
    }

    pub(super) fn expo_in_inv(y: f64) -> f64 {
        if y <= 0.0 {
            0.0
        } else {
            (y.log2() + 10.0) / 10.0
        }
    }

    pub(super) fn expo_in_int(t: f64) -> f64 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            (expo_in(t) - EXPO_FLOOR) / (1.0 - EXPO_FLOOR)
        }
    }

    pub(super) fn expo_out(x: f64) -> f64 {
        if x >= 1.0 {
            1.0
        } else {
            1.0 - (-10.0 * x).exp2()
        }
    }

    pub(super) fn expo_out_inv(y: f64) -> f64 {
        if y >= 1.0 {
            1.0
        } else {
            -(1.0 - y).log2() / 10.0
        }
    }

    pub(super) fn expo_out_int(t: f64) -> f64 {
        let scale = 10.0 * LN_2;
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            let area = t - (1.0 - (-10.0 * t).exp2()) / scale;
            area / (1.0 - (1.0 - EXPO_FLOOR) / scale)
        }
    }
}
