//! Bevy integration.
//!
//! [`LocomotionPlugin`] runs the locomotion step for every entity carrying a
//! [`Locomotion`] component once per `FixedUpdate`. Settings edits made
//! through [`LocomotionConfig`] are rebound before the step that follows
//! them; invalid edits trigger a [`LocomotionConfigError`] and leave the
//! previous settings active.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use glam::DVec3;
use log::error;
use thiserror::Error;

use crate::avoidance::ObstacleQuery;
use crate::error::ConfigError;
use crate::locomotion::{LocomotionController, StepReport};
use crate::settings::LocomotionSettings;

/// Directional input for the current tick, in the ground plane (`x`, `z`).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput(pub Vec2);

/// Velocity shared with the physics backend.
///
/// Read before each step so collision responses are honoured, then
/// overwritten with the step's result.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyVelocity(pub Vec3);

/// Editable settings of one character.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct LocomotionConfig(pub LocomotionSettings);

/// Per-character controller state.
#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    controller: LocomotionController,
    last: Option<StepReport>,
}

impl Locomotion {
    /// Builds a controller at rest.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] in `settings`.
    pub fn new(settings: LocomotionSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: LocomotionController::new(settings)?,
            last: None,
        })
    }

    /// The wrapped controller.
    #[must_use]
    pub const fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    /// Report from the most recent step, if any.
    #[must_use]
    pub const fn last_report(&self) -> Option<&StepReport> {
        self.last.as_ref()
    }
}

/// Components needed to drive a character with `settings`.
///
/// # Errors
/// Returns the first [`ConfigError`] in `settings`.
pub fn locomotion_bundle(settings: LocomotionSettings) -> Result<impl Bundle, ConfigError> {
    let locomotion = Locomotion::new(settings.clone())?;
    Ok((
        MovementInput::default(),
        BodyVelocity::default(),
        LocomotionConfig(settings),
        locomotion,
    ))
}

/// Collision scene queried by the obstacle search.
///
/// Without this resource characters move without avoidance.
#[derive(Resource)]
pub struct ObstacleScene(pub Box<dyn ObstacleQuery + Send + Sync>);

impl ObstacleScene {
    /// Wraps a query backend.
    #[must_use]
    pub fn new(query: impl ObstacleQuery + Send + Sync + 'static) -> Self {
        Self(Box::new(query))
    }
}

/// Event raised when edited settings could not be applied.
#[derive(Event, Debug, Clone, Error)]
#[error("locomotion settings for {entity} rejected: {error}")]
pub struct LocomotionConfigError {
    /// Entity whose settings were rejected.
    pub entity: Entity,
    /// Why they were rejected.
    pub error: ConfigError,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_config_error(event: On<LocomotionConfigError>) {
    error!("{}", event.event());
}

/// Rebinds controllers whose [`LocomotionConfig`] changed since the last run.
pub fn rebind_changed_settings(
    mut commands: Commands,
    mut query: Query<(Entity, &LocomotionConfig, &mut Locomotion), Changed<LocomotionConfig>>,
) {
    for (entity, config, mut locomotion) in &mut query {
        if locomotion.controller.settings() == &config.0 {
            continue;
        }
        if let Err(error) = locomotion.controller.rebind(config.0.clone()) {
            commands.trigger(LocomotionConfigError { entity, error });
        }
    }
}

/// Advances every character by one fixed timestep.
pub fn locomotion_step_system(
    time: Res<Time<Fixed>>,
    scene: Option<Res<ObstacleScene>>,
    mut query: Query<(
        &MovementInput,
        &mut BodyVelocity,
        &mut Locomotion,
        Option<&Transform>,
    )>,
) {
    let dt = time.timestep().as_secs_f64();
    let obstacles = scene.as_deref().map(|loaded| loaded.0.as_ref());
    for (input, mut body, mut locomotion, transform) in &mut query {
        let position = transform.map_or(DVec3::ZERO, |t| t.translation.as_dvec3());
        locomotion.controller.sync_velocity(body.0.as_dvec3());
        let report = locomotion
            .controller
            .step(input.0.as_dvec2(), dt, position, obstacles);
        body.0 = report.velocity.as_vec3();
        locomotion.last = Some(report);
    }
}

/// Installs the locomotion systems into `FixedUpdate`.
#[derive(Default)]
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_config_error);
        app.add_systems(
            FixedUpdate,
            (rebind_changed_settings, locomotion_step_system).chain(),
        );
    }
}
