//! Ground-plane vector helpers.
//!
//! Velocities and directions live on the horizontal plane. A planar
//! [`DVec2`] stores the world `x` axis in `x` and the world `z` axis in `y`;
//! world `y` is up. Angles are in radians and measured counter-clockwise in
//! that planar frame.
use glam::{DVec2, DVec3};

use crate::constants::DIRECTION_EPSILON_SQUARED;

/// Projects a world-space vector onto the ground plane.
///
/// # Examples
/// ```
/// use glam::{DVec2, DVec3};
/// use stride::geometry::planar;
/// assert_eq!(planar(DVec3::new(1.0, 7.0, -2.0)), DVec2::new(1.0, -2.0));
/// ```
#[must_use]
pub const fn planar(vector: DVec3) -> DVec2 {
    DVec2::new(vector.x, vector.z)
}

/// Lifts a ground-plane vector back into world space with `y = 0`.
#[must_use]
pub const fn spatial(vector: DVec2) -> DVec3 {
    DVec3::new(vector.x, 0.0, vector.y)
}

/// Returns the unit vector along `vector`, or `None` when it is degenerate.
///
/// Non-finite vectors and vectors shorter than the direction epsilon are
/// treated as having no direction.
#[must_use]
pub fn direction(vector: DVec2) -> Option<DVec2> {
    if !vector.is_finite() || vector.length_squared() <= DIRECTION_EPSILON_SQUARED {
        return None;
    }
    Some(vector.normalize())
}

/// Clamps an input vector to unit length, mapping non-finite input to zero.
#[must_use]
pub fn clamp_input(input: DVec2) -> DVec2 {
    if input.is_finite() {
        input.clamp_length_max(1.0)
    } else {
        DVec2::ZERO
    }
}

/// Returns the point on the line through `origin` along `direction` that is
/// closest to the world origin.
///
/// A degenerate direction yields `origin` itself.
///
/// # Examples
/// ```
/// use glam::DVec2;
/// use stride::geometry::closest_point_to_origin;
///
/// let p = closest_point_to_origin(DVec2::new(2.0, 3.0), DVec2::new(-4.0, 0.0));
/// assert_eq!(p, DVec2::new(0.0, 3.0));
/// assert_eq!(closest_point_to_origin(DVec2::ONE, DVec2::ZERO), DVec2::ONE);
/// ```
#[must_use]
pub fn closest_point_to_origin(origin: DVec2, direction: DVec2) -> DVec2 {
    let length_squared = direction.length_squared();
    if length_squared <= DIRECTION_EPSILON_SQUARED {
        return origin;
    }
    origin - direction * (origin.dot(direction) / length_squared)
}

/// Moves `current` towards `target` by at most `max_delta`.
///
/// Reaches `target` exactly once it is within `max_delta`, so repeated calls
/// never overshoot.
///
/// # Examples
/// ```
/// use glam::DVec2;
/// use stride::geometry::move_towards;
///
/// let step = move_towards(DVec2::ZERO, DVec2::new(10.0, 0.0), 4.0);
/// assert_eq!(step, DVec2::new(4.0, 0.0));
/// let arrive = move_towards(DVec2::ZERO, DVec2::new(1.0, 0.0), 4.0);
/// assert_eq!(arrive, DVec2::new(1.0, 0.0));
/// ```
#[must_use]
pub fn move_towards(current: DVec2, target: DVec2, max_delta: f64) -> DVec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance == 0.0 || (max_delta >= 0.0 && distance <= max_delta) {
        return target;
    }
    current + delta / distance * max_delta
}

/// Signed angle that rotates `from` onto `to`, in `(-π, π]`.
///
/// Positive angles are counter-clockwise in the planar frame. Degenerate
/// vectors produce zero.
#[must_use]
pub fn signed_angle(from: DVec2, to: DVec2) -> f64 {
    let cross = from.perp_dot(to);
    let dot = from.dot(to);
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross.atan2(dot)
}

/// Rotates `vector` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(vector: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(vector)
}

/// Horizontal distance between two world-space points.
#[must_use]
pub fn horizontal_distance(a: DVec3, b: DVec3) -> f64 {
    planar(a - b).length()
}
