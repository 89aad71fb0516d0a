#![cfg_attr(docsrs, feature(doc_cfg))]
//! Locomotion core for third-person characters.
//!
//! Input directions become velocities that follow designer-authored
//! acceleration and deceleration curves, and planned headings are steered
//! around obstacles found by sweeping the character's capsule through the
//! scene. The [`plugin`] module wires everything into Bevy's `FixedUpdate`.
pub mod avoidance;
pub mod constants;
pub mod controller;
pub mod curve;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod locomotion;
pub mod logging;
pub mod plugin;
pub mod profile;
pub mod settings;
pub use constants::*;

// Re-export commonly used items
pub use avoidance::{AvoidanceOutcome, ObstacleQuery, ShapeCast, ShapeCastHit};
pub use controller::{MotionState, StepPhase, VelocityController};
pub use curve::ScaledCurve;
pub use easing::{CurveTriple, EasingProfile};
pub use error::{ConfigError, QueryError, SettingsError};
pub use locomotion::{LocomotionController, StepReport};
pub use logging::init as init_logging;
pub use plugin::{
    BodyVelocity, Locomotion, LocomotionConfig, LocomotionConfigError, LocomotionPlugin,
    MovementInput, ObstacleScene,
};
pub use profile::ProfileBinding;
pub use settings::{AvoidanceSettings, CharacterShape, LocomotionSettings, VelocityStrategy};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use stride::prelude::*;
    //! ```

    pub use crate::avoidance::{ObstacleQuery, ShapeCast, ShapeCastHit};
    pub use crate::easing::EasingProfile;
    pub use crate::locomotion::LocomotionController;
    pub use crate::plugin::LocomotionPlugin;
    pub use crate::settings::LocomotionSettings;
    pub use glam::{DVec2, DVec3};
}
