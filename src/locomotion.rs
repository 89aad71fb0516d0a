//! The full locomotion step: plan, look ahead, steer, commit.

use glam::{DVec2, DVec3};
use log::{debug, warn};

use crate::avoidance::{self, AvoidanceOutcome, AvoidanceRequest, ObstacleQuery};
use crate::constants::CAST_RADIUS_SCALE;
use crate::controller::{MotionState, StepPhase, VelocityController};
use crate::error::ConfigError;
use crate::geometry::{clamp_input, planar, spatial};
use crate::settings::LocomotionSettings;

/// What one step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Velocity to hand to the physics backend. `y` is always zero.
    pub velocity: DVec3,
    /// Transition taken along the main axis.
    pub phase: StepPhase,
    /// Result of the obstacle search.
    pub avoidance: AvoidanceOutcome,
}

/// Drives one character: velocity shaping plus obstacle avoidance.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    settings: LocomotionSettings,
    velocity: VelocityController,
}

impl LocomotionController {
    /// Builds a controller at rest from validated `settings`.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] in `settings`.
    pub fn new(settings: LocomotionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let velocity = VelocityController::new(&settings)?;
        Ok(Self { settings, velocity })
    }

    /// Swaps in new settings before the next step.
    ///
    /// Invalid settings are rejected and the current ones stay active.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] in `settings`.
    pub fn rebind(&mut self, settings: LocomotionSettings) -> Result<(), ConfigError> {
        if let Err(err) = settings
            .validate()
            .and_then(|()| self.velocity.rebind(&settings))
        {
            warn!("rejected locomotion settings: {err}");
            return Err(err);
        }
        self.settings = settings;
        Ok(())
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    /// Current motion state.
    #[must_use]
    pub const fn state(&self) -> &MotionState {
        self.velocity.state()
    }

    /// Braking distance from `speed` along the deceleration curve.
    #[must_use]
    pub fn stopping_distance(&self, speed: f64) -> f64 {
        self.velocity.binding().stopping_distance(speed)
    }

    /// Replaces the tracked velocity with the body's actual velocity.
    ///
    /// Only the ground-plane component is kept.
    pub fn sync_velocity(&mut self, velocity: DVec3) {
        self.velocity.set_velocity(planar(velocity));
    }

    /// Advances the character by `dt` seconds.
    ///
    /// `position` is the body position the capsule offset is measured from.
    /// Without a `scene` the obstacle search is skipped.
    pub fn step<Q>(
        &mut self,
        input: DVec2,
        dt: f64,
        position: DVec3,
        scene: Option<&Q>,
    ) -> StepReport
    where
        Q: ObstacleQuery + ?Sized,
    {
        let clamped = clamp_input(input);
        let mut plan = self.velocity.plan(clamped, dt);
        let avoidance = match scene {
            Some(query) => self.avoid(query, clamped, plan.velocity, position),
            None => AvoidanceOutcome::Skipped,
        };
        if let Some(direction) = avoidance.steered_direction() {
            let steered = direction * clamped.length();
            debug!("steering input {clamped} -> {steered}");
            plan = self.velocity.plan(steered, dt);
        }
        self.velocity.commit(&plan);
        StepReport {
            velocity: spatial(plan.velocity),
            phase: plan.phase,
            avoidance,
        }
    }

    fn avoid<Q>(
        &self,
        query: &Q,
        input: DVec2,
        provisional: DVec2,
        position: DVec3,
    ) -> AvoidanceOutcome
    where
        Q: ObstacleQuery + ?Sized,
    {
        let shape = &self.settings.shape;
        let avoidance = &self.settings.avoidance;
        let request = AvoidanceRequest {
            origin: position + DVec3::Y * shape.center_offset,
            heading: provisional,
            input,
            distance: self.stopping_distance(provisional.length()) + avoidance.detection_distance,
            radius: shape.radius * CAST_RADIUS_SCALE,
            height: shape.height,
        };
        avoidance::search(query, avoidance, &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avoidance::{ShapeCast, ShapeCastHit};
    use crate::error::QueryError;
    use crate::settings::AvoidanceSettings;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};
    use std::cell::Cell;

    /// A wall across the +x axis at `x = 2`.
    struct Wall {
        casts: Cell<u32>,
    }

    impl ObstacleQuery for Wall {
        fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
            self.casts.set(self.casts.get() + 1);
            let approach = cast.direction.x;
            if approach <= 0.0 {
                return Ok(None);
            }
            let travel = (2.0 - cast.radius - cast.origin.x) / approach;
            if travel > cast.max_distance {
                return Ok(None);
            }
            let centre = cast.origin + cast.direction * travel;
            Ok(Some(ShapeCastHit {
                distance: travel,
                point: DVec3::new(2.0, cast.origin.y, centre.z),
                normal: DVec3::NEG_X,
            }))
        }
    }

    #[fixture]
    fn controller() -> LocomotionController {
        LocomotionController::new(LocomotionSettings::default()).expect("valid defaults")
    }

    #[rstest]
    fn rejects_invalid_settings() {
        let settings = LocomotionSettings {
            avoidance: AvoidanceSettings {
                max_iterations: 0,
                ..AvoidanceSettings::default()
            },
            ..LocomotionSettings::default()
        };
        assert_eq!(
            LocomotionController::new(settings).map(|_| ()),
            Err(ConfigError::ZeroIterations)
        );
    }

    #[rstest]
    fn step_without_scene_skips_avoidance(mut controller: LocomotionController) {
        let report = controller.step::<Wall>(DVec2::X, 0.02, DVec3::ZERO, None);
        assert_eq!(report.avoidance, AvoidanceOutcome::Skipped);
        assert!(report.velocity.x > 0.0);
        assert_eq!(report.velocity.y, 0.0);
        assert_eq!(controller.state().velocity, planar(report.velocity));
    }

    #[rstest]
    fn rest_without_input_never_queries(mut controller: LocomotionController) {
        let wall = Wall {
            casts: Cell::new(0),
        };
        let report = controller.step(DVec2::ZERO, 0.02, DVec3::ZERO, Some(&wall));
        assert_eq!(report.avoidance, AvoidanceOutcome::Skipped);
        assert_eq!(wall.casts.get(), 0);
    }

    #[rstest]
    fn steered_step_replans_with_original_magnitude() {
        let settings = LocomotionSettings {
            avoidance: AvoidanceSettings {
                allowed_steering_angle: 90.0,
                ..AvoidanceSettings::default()
            },
            ..LocomotionSettings::default()
        };
        let mut controller = LocomotionController::new(settings).expect("valid settings");
        controller.sync_velocity(DVec3::new(6.0, 0.0, 0.0));
        let wall = Wall {
            casts: Cell::new(0),
        };
        let input = DVec2::new(0.25, 0.25 * 3.0_f64.sqrt());
        let report = controller.step(input, 0.02, DVec3::new(0.5, 0.0, 0.0), Some(&wall));
        let AvoidanceOutcome::Steered { direction, .. } = report.avoidance else {
            panic!("expected to steer, got {:?}", report.avoidance);
        };
        let mut reference =
            VelocityController::new(&LocomotionSettings::default()).expect("valid defaults");
        reference.set_velocity(DVec2::new(6.0, 0.0));
        let expected = reference.plan(direction * 0.5, 0.02);
        assert_relative_eq!(report.velocity.x, expected.velocity.x, epsilon = 1e-12);
        assert_relative_eq!(report.velocity.z, expected.velocity.y, epsilon = 1e-12);
    }

    #[rstest]
    fn stopping_distance_grows_with_speed(controller: LocomotionController) {
        assert_relative_eq!(controller.stopping_distance(0.0), 0.0);
        assert!(controller.stopping_distance(2.0) < controller.stopping_distance(4.0));
    }

    #[rstest]
    fn failed_rebind_keeps_settings(mut controller: LocomotionController) {
        let broken = LocomotionSettings {
            time_to_stop: 0.0,
            ..LocomotionSettings::default()
        };
        assert!(controller.rebind(broken).is_err());
        assert_relative_eq!(controller.settings().time_to_stop, 0.25);
    }
}
