//! Iterative steering around obstacles.
//!
//! The search casts the character's capsule along its planned heading. When
//! the cast meets a surface the player does not appear to be aiming for, the
//! heading is rotated away from the surface in growing increments and
//! re-cast until the way is clear or the steering budget runs out.
//!
//! Query failures are fail-open: a backend error is logged and handled as if
//! nothing had been hit. Avoidance only smooths movement; the physics
//! backend still resolves real contacts.

use glam::{DVec2, DVec3};
use log::{debug, warn};

use crate::error::QueryError;
use crate::geometry::{direction, horizontal_distance, planar, rotate, signed_angle, spatial};
use crate::settings::AvoidanceSettings;

/// A capsule swept through the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCast {
    /// Centre of the capsule at the start of the sweep.
    pub origin: DVec3,
    /// Capsule radius.
    pub radius: f64,
    /// Distance between the hemisphere centres.
    pub height: f64,
    /// Unit sweep direction.
    pub direction: DVec3,
    /// Furthest distance the capsule centre may travel.
    pub max_distance: f64,
    /// Collision layers to test against.
    pub layers: u32,
}

/// The nearest contact reported by a [`ShapeCast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCastHit {
    /// Distance the capsule travelled before touching the surface.
    pub distance: f64,
    /// Contact point in world space.
    pub point: DVec3,
    /// Surface normal at the contact point.
    pub normal: DVec3,
}

/// Read-only access to the collision scene.
///
/// Implementations return the nearest hit along the sweep, or `None` when
/// the sweep is unobstructed. Errors are not fatal to the caller: the
/// search treats them as an unobstructed sweep.
#[cfg_attr(test, mockall::automock)]
pub trait ObstacleQuery {
    /// Sweeps `cast` through the scene.
    ///
    /// # Errors
    /// Returns a [`QueryError`] when the backend cannot answer.
    fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError>;
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for &T {
    fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
        (**self).cast_shape(cast)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for Box<T> {
    fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
        (**self).cast_shape(cast)
    }
}

/// Where and how far to look for obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceRequest {
    /// Capsule centre.
    pub origin: DVec3,
    /// Planned heading on the ground plane.
    pub heading: DVec2,
    /// The player's input on the ground plane.
    pub input: DVec2,
    /// Length of the first sweep.
    pub distance: f64,
    /// Radius used for the sweep.
    pub radius: f64,
    /// Capsule height used for the sweep.
    pub height: f64,
}

/// Result of one avoidance search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvoidanceOutcome {
    /// Avoidance was disabled or the heading or input had no direction.
    Skipped,
    /// Nothing was hit, or the scene query failed.
    Clear,
    /// The player is steering into the surface on purpose.
    Intended,
    /// A clear heading was found.
    Steered {
        /// Unit heading to use instead of the planned one.
        direction: DVec2,
        /// Total deflection in radians.
        deflection: f64,
        /// Rotations applied before the way was clear.
        iterations: u32,
    },
    /// No clear heading within the steering budget or iteration cap.
    BudgetExceeded {
        /// Deflection in radians reached when the search gave up.
        deflection: f64,
    },
}

impl AvoidanceOutcome {
    /// The replacement heading, if the search steered.
    #[must_use]
    pub const fn steered_direction(&self) -> Option<DVec2> {
        match self {
            Self::Steered { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Searches for a heading that avoids the obstacle ahead.
///
/// Issues at most `settings.max_iterations + 1` queries.
#[must_use]
pub fn search<Q>(
    query: &Q,
    settings: &AvoidanceSettings,
    request: &AvoidanceRequest,
) -> AvoidanceOutcome
where
    Q: ObstacleQuery + ?Sized,
{
    if !settings.enabled || !(request.distance.is_finite() && request.distance > 0.0) {
        return AvoidanceOutcome::Skipped;
    }
    let (Some(heading), Some(input)) = (direction(request.heading), direction(request.input))
    else {
        return AvoidanceOutcome::Skipped;
    };

    let Some(hit) = cast(query, settings.obstacle_layers, request, heading, request.distance) else {
        return AvoidanceOutcome::Clear;
    };

    let angle_to_wall = signed_angle(-planar(hit.normal), input);
    if angle_to_wall.abs() <= settings.minimum_surface_angle.to_radians() {
        debug!(
            "pressing into surface at {:.1}°",
            angle_to_wall.to_degrees()
        );
        return AvoidanceOutcome::Intended;
    }

    let outcome = deflect(query, settings, request, heading, angle_to_wall.signum(), hit.point);
    debug!("obstacle avoidance: {outcome:?}");
    outcome
}

fn deflect<Q>(
    query: &Q,
    settings: &AvoidanceSettings,
    request: &AvoidanceRequest,
    heading: DVec2,
    turn: f64,
    first_contact: DVec3,
) -> AvoidanceOutcome
where
    Q: ObstacleQuery + ?Sized,
{
    let budget = settings.allowed_steering_angle.to_radians();
    let margin = settings.allowed_angle_error.to_radians();
    let mut candidate = heading;
    let mut contact = first_contact;
    let mut deflection = 0.0;

    for iteration in 1..=settings.max_iterations {
        let reach = horizontal_distance(request.origin, contact);
        let step = ((request.radius / reach).atan() + margin).abs();
        deflection += step;
        if deflection > budget {
            return AvoidanceOutcome::BudgetExceeded { deflection };
        }
        candidate = rotate(candidate, turn * step);
        match cast(query, settings.obstacle_layers, request, candidate, reach) {
            None => {
                return AvoidanceOutcome::Steered {
                    direction: candidate.normalize_or_zero(),
                    deflection,
                    iterations: iteration,
                };
            }
            Some(hit) => contact = hit.point,
        }
    }
    AvoidanceOutcome::BudgetExceeded { deflection }
}

fn cast<Q>(
    query: &Q,
    layers: u32,
    request: &AvoidanceRequest,
    heading: DVec2,
    max_distance: f64,
) -> Option<ShapeCastHit>
where
    Q: ObstacleQuery + ?Sized,
{
    let shape = ShapeCast {
        origin: request.origin,
        radius: request.radius,
        height: request.height,
        direction: spatial(heading),
        max_distance,
        layers,
    };
    match query.cast_shape(&shape) {
        Ok(hit) => hit,
        Err(err) => {
            warn!("{err}; treating the sweep as unobstructed");
            None
        }
    }
}
