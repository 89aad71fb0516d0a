//! Per-step velocity controller.
//!
//! A [`VelocityController`] owns the bound curves and the [`MotionState`] of
//! one character. Planning a step is pure: [`VelocityController::plan`]
//! returns a [`VelocityPlan`] without touching the state, so callers can plan
//! more than once (for example after steering around an obstacle) and commit
//! only the plan they keep.
//!
//! ```
//! use glam::DVec2;
//! use stride::controller::VelocityController;
//! use stride::settings::LocomotionSettings;
//!
//! let mut controller = VelocityController::new(&LocomotionSettings::default()).unwrap();
//! let plan = controller.plan(DVec2::new(1.0, 0.0), 0.02);
//! controller.commit(&plan);
//! assert!(controller.state().velocity.x > 0.0);
//! ```

mod main_direction;
mod turning_point;

use glam::DVec2;
use log::debug;

use crate::error::ConfigError;
use crate::geometry::{clamp_input, direction};
use crate::profile::ProfileBinding;
use crate::settings::{LocomotionSettings, VelocityStrategy};

/// Motion carried between steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Current ground-plane velocity.
    pub velocity: DVec2,
    /// Last non-zero input direction. Starts as world forward.
    pub main_direction: DVec2,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: DVec2::ZERO,
            main_direction: DVec2::Y,
        }
    }
}

/// The transition a step took along its curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepPhase {
    /// Already at the target velocity.
    Holding,
    /// Advancing along the acceleration curve.
    Accelerating,
    /// Walking the deceleration curve back towards a lower speed.
    Decelerating,
    /// Braking speed that opposes the main direction.
    Reversing,
    /// The deceleration curve ran out within the step and the remaining time
    /// was spent accelerating.
    HandOff,
}

/// The outcome of planning one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityPlan {
    /// Velocity at the end of the step.
    pub velocity: DVec2,
    /// Main direction to carry into the next step.
    pub main_direction: DVec2,
    /// Transition taken along the main axis.
    pub phase: StepPhase,
}

/// Shapes a character's velocity along its bound curves.
#[derive(Debug, Clone)]
pub struct VelocityController {
    strategy: VelocityStrategy,
    binding: ProfileBinding,
    state: MotionState,
}

impl VelocityController {
    /// Builds a controller at rest facing world forward.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the curves cannot be bound.
    pub fn new(settings: &LocomotionSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            strategy: settings.strategy,
            binding: ProfileBinding::bind(settings)?,
            state: MotionState::default(),
        })
    }

    /// Applies new settings without disturbing the motion state.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] and keeps the previous binding and strategy
    /// when the settings are invalid.
    pub fn rebind(&mut self, settings: &LocomotionSettings) -> Result<(), ConfigError> {
        self.binding.rebind(settings)?;
        self.strategy = settings.strategy;
        Ok(())
    }

    /// Current motion state.
    #[must_use]
    pub const fn state(&self) -> &MotionState {
        &self.state
    }

    /// Bound acceleration and deceleration curves.
    #[must_use]
    pub const fn binding(&self) -> &ProfileBinding {
        &self.binding
    }

    /// Active strategy.
    #[must_use]
    pub const fn strategy(&self) -> VelocityStrategy {
        self.strategy
    }

    /// Overwrites the tracked velocity, e.g. after the physics backend
    /// resolved a collision.
    pub fn set_velocity(&mut self, velocity: DVec2) {
        if velocity.is_finite() {
            self.state.velocity = velocity;
        }
    }

    /// Plans the velocity after `dt` seconds of `input`.
    ///
    /// `input` is clamped to unit length. Non-positive or non-finite `dt`
    /// plans a zero-length step.
    #[must_use]
    pub fn plan(&self, input: DVec2, dt: f64) -> VelocityPlan {
        let clamped = clamp_input(input);
        let step_time = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let heading = direction(clamped).unwrap_or(self.state.main_direction);
        let (velocity, phase) = match self.strategy {
            VelocityStrategy::TurningPoint => {
                turning_point::next_velocity(&self.binding, self.state.velocity, clamped, step_time)
            }
            VelocityStrategy::MainDirection => main_direction::next_velocity(
                &self.binding,
                self.state.velocity,
                heading,
                clamped.length(),
                step_time,
            ),
        };
        VelocityPlan {
            velocity,
            main_direction: heading,
            phase,
        }
    }

    /// Makes `plan` the current motion state.
    pub fn commit(&mut self, plan: &VelocityPlan) {
        debug!(
            "{:?}: velocity {} -> {}",
            plan.phase, self.state.velocity, plan.velocity
        );
        self.state = MotionState {
            velocity: plan.velocity,
            main_direction: plan.main_direction,
        };
    }

    /// Plans and commits one step.
    pub fn step(&mut self, input: DVec2, dt: f64) -> VelocityPlan {
        let plan = self.plan(input, dt);
        self.commit(&plan);
        plan
    }
}
