//! Main-direction decomposition.
//!
//! Velocity is split into a signed speed along the sticky main direction and
//! a signed speed across it. The along speed chases the input magnitude; the
//! cross speed always bleeds off along the deceleration curve.

use glam::DVec2;

use super::StepPhase;
use crate::constants::SPEED_EPSILON;
use crate::profile::ProfileBinding;

/// Velocity after `dt` seconds of input of `magnitude` along `main_direction`.
pub(super) fn next_velocity(
    binding: &ProfileBinding,
    velocity: DVec2,
    main_direction: DVec2,
    magnitude: f64,
    dt: f64,
) -> (DVec2, StepPhase) {
    let across = main_direction.perp();
    let target = magnitude * binding.top_speed();
    let (along, phase) = advance_along(binding, velocity.dot(main_direction), target, dt);
    let lateral = decay(binding, velocity.dot(across), dt);
    (main_direction * along + across * lateral, phase)
}

fn advance_along(binding: &ProfileBinding, speed: f64, target: f64, dt: f64) -> (f64, StepPhase) {
    let acceleration = binding.acceleration();
    let deceleration = binding.deceleration();

    if speed < 0.0 {
        let phase_time = deceleration.curve_inverse(-speed) - dt;
        if phase_time < 0.0 {
            let resumed = acceleration.curve(-phase_time).min(target);
            return (resumed, StepPhase::HandOff);
        }
        return (-deceleration.curve(phase_time), StepPhase::Reversing);
    }
    if (speed - target).abs() <= SPEED_EPSILON {
        return (target, StepPhase::Holding);
    }
    if speed < target {
        let phase_time = acceleration.curve_inverse(speed) + dt;
        (acceleration.curve(phase_time).min(target), StepPhase::Accelerating)
    } else {
        let phase_time = deceleration.curve_inverse(speed) - dt;
        (deceleration.curve(phase_time).max(target), StepPhase::Decelerating)
    }
}

/// Moves a signed speed towards zero without crossing it.
fn decay(binding: &ProfileBinding, speed: f64, dt: f64) -> f64 {
    let deceleration = binding.deceleration();
    let remaining = deceleration.curve(deceleration.curve_inverse(speed.abs()) - dt);
    remaining.copysign(speed)
}
