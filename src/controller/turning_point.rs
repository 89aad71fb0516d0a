//! Turning-point blending.
//!
//! Velocity travels the straight line from its current value to the target.
//! The point on that line closest to zero is the turning point: up to it the
//! character sheds speed along the deceleration curve, beyond it the
//! character gains speed along the acceleration curve. Distances to the
//! turning point are read as speeds on those curves.

use glam::DVec2;

use super::StepPhase;
use crate::constants::DIRECTION_EPSILON_SQUARED;
use crate::geometry::{closest_point_to_origin, move_towards};
use crate::profile::ProfileBinding;

/// Velocity after `dt` seconds of clamped `input`.
pub(super) fn next_velocity(
    binding: &ProfileBinding,
    velocity: DVec2,
    input: DVec2,
    dt: f64,
) -> (DVec2, StepPhase) {
    let target = input * binding.top_speed();
    let delta = target - velocity;
    if delta.length_squared() <= DIRECTION_EPSILON_SQUARED {
        return (target, StepPhase::Holding);
    }

    let turning_point = closest_point_to_origin(velocity, delta);
    let to_turn = turning_point - velocity;
    let acceleration = binding.acceleration();

    if delta.dot(to_turn) > 0.0 {
        let deceleration = binding.deceleration();
        let phase_time = deceleration.curve_inverse(to_turn.length()) - dt;
        if phase_time < 0.0 {
            let speed = acceleration.curve(-phase_time);
            (move_towards(turning_point, target, speed), StepPhase::HandOff)
        } else {
            let speed = deceleration.curve(phase_time);
            (
                move_towards(turning_point, velocity, speed),
                StepPhase::Decelerating,
            )
        }
    } else {
        let phase_time = acceleration.curve_inverse(to_turn.length()) + dt;
        let speed = acceleration.curve(phase_time);
        (
            move_towards(turning_point, target, speed),
            StepPhase::Accelerating,
        )
    }
}
