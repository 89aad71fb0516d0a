//! Analytic obstacle scenes.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::{DVec2, DVec3};
use stride::avoidance::{ObstacleQuery, ShapeCast, ShapeCastHit};
use stride::error::QueryError;
use stride::geometry::{planar, spatial};

/// A circle sweep that came to rest against something.
struct Contact {
    travel: f64,
    point: DVec2,
    normal: DVec2,
}

fn to_hit(cast: &ShapeCast, contact: Contact) -> ShapeCastHit {
    let lift = DVec3::Y * cast.origin.y;
    ShapeCastHit {
        distance: contact.travel,
        point: spatial(contact.point) + lift,
        normal: spatial(contact.normal),
    }
}

fn sweep_direction(cast: &ShapeCast) -> Option<DVec2> {
    planar(cast.direction).try_normalize()
}

/// Sweeps a circle of `radius` from `origin` along `dir` against a disc of
/// `reach` around `centre`. Returns the travel at first touch.
fn sweep_circle(origin: DVec2, dir: DVec2, centre: DVec2, reach: f64) -> Option<f64> {
    let offset = origin - centre;
    let b = offset.dot(dir);
    let c = offset.length_squared() - reach * reach;
    if c <= 0.0 {
        return (b < 0.0).then_some(0.0);
    }
    if b >= 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

/// An infinite vertical wall through `point` facing `normal`.
#[derive(Debug, Clone, Copy)]
pub struct PlaneWall {
    point: DVec2,
    normal: DVec2,
}

impl PlaneWall {
    /// Wall through `point` whose horizontal normal is `normal`.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use test_utils::PlaneWall;
    /// let wall = PlaneWall::new(DVec3::new(2.0, 0.0, 0.0), DVec3::NEG_X);
    /// # let _ = wall;
    /// ```
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point: planar(point),
            normal: planar(normal).normalize_or_zero(),
        }
    }

    fn contact(&self, cast: &ShapeCast) -> Option<Contact> {
        let dir = sweep_direction(cast)?;
        let origin = planar(cast.origin);
        let approach = -dir.dot(self.normal);
        if approach <= 0.0 {
            return None;
        }
        let clearance = (origin - self.point).dot(self.normal) - cast.radius;
        let travel = (clearance / approach).max(0.0);
        let centre = origin + dir * travel;
        Some(Contact {
            travel,
            point: centre - self.normal * cast.radius,
            normal: self.normal,
        })
    }
}

/// An infinite vertical cylinder.
#[derive(Debug, Clone, Copy)]
pub struct Pillar {
    centre: DVec2,
    radius: f64,
}

impl Pillar {
    /// Pillar standing on `centre` with `radius`.
    pub fn new(centre: DVec3, radius: f64) -> Self {
        Self {
            centre: planar(centre),
            radius,
        }
    }

    fn contact(&self, cast: &ShapeCast) -> Option<Contact> {
        let dir = sweep_direction(cast)?;
        let origin = planar(cast.origin);
        let travel = sweep_circle(origin, dir, self.centre, self.radius + cast.radius)?;
        let centre = origin + dir * travel;
        let normal = (centre - self.centre).normalize_or_zero();
        Some(Contact {
            travel,
            point: self.centre + normal * self.radius,
            normal,
        })
    }
}

/// A vertical wall of zero thickness between two ground points.
#[derive(Debug, Clone, Copy)]
pub struct WallSegment {
    start: DVec2,
    end: DVec2,
}

impl WallSegment {
    /// Wall from `start` to `end`; heights are ignored.
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self {
            start: planar(start),
            end: planar(end),
        }
    }

    fn contact(&self, cast: &ShapeCast) -> Option<Contact> {
        let dir = sweep_direction(cast)?;
        let origin = planar(cast.origin);
        let span = self.end - self.start;
        let mut best: Option<Contact> = None;
        let mut consider = |candidate: Contact| {
            if best.as_ref().map_or(true, |b| candidate.travel < b.travel) {
                best = Some(candidate);
            }
        };

        if let Some(mut normal) = span.perp().try_normalize() {
            if (origin - self.start).dot(normal) < 0.0 {
                normal = -normal;
            }
            let approach = -dir.dot(normal);
            let clearance = (origin - self.start).dot(normal) - cast.radius;
            if approach > 0.0 && clearance >= 0.0 {
                let travel = clearance / approach;
                let centre = origin + dir * travel;
                let along = (centre - self.start).dot(span) / span.length_squared();
                if (0.0..=1.0).contains(&along) {
                    consider(Contact {
                        travel,
                        point: self.start + span * along,
                        normal,
                    });
                }
            }
        }

        for end in [self.start, self.end] {
            if let Some(travel) = sweep_circle(origin, dir, end, cast.radius) {
                let centre = origin + dir * travel;
                consider(Contact {
                    travel,
                    point: end,
                    normal: (centre - end).normalize_or_zero(),
                });
            }
        }
        best
    }
}

macro_rules! impl_obstacle_query {
    ($($ty:ty),*) => {
        $(
            impl ObstacleQuery for $ty {
                fn cast_shape(
                    &self,
                    cast: &ShapeCast,
                ) -> Result<Option<ShapeCastHit>, QueryError> {
                    Ok(self
                        .contact(cast)
                        .filter(|c| c.travel <= cast.max_distance)
                        .map(|c| to_hit(cast, c)))
                }
            }
        )*
    };
}

impl_obstacle_query!(PlaneWall, Pillar, WallSegment);

/// A collection of obstacles on collision layers. Reports the nearest hit
/// among obstacles whose layer intersects the cast's mask.
#[derive(Default)]
pub struct Scene {
    obstacles: Vec<(u32, Box<dyn ObstacleQuery + Send + Sync>)>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `obstacle` on the layers in `layer`.
    pub fn with(mut self, layer: u32, obstacle: impl ObstacleQuery + Send + Sync + 'static) -> Self {
        self.obstacles.push((layer, Box::new(obstacle)));
        self
    }
}

impl ObstacleQuery for Scene {
    fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
        let mut nearest: Option<ShapeCastHit> = None;
        for (layer, obstacle) in &self.obstacles {
            if layer & cast.layers == 0 {
                continue;
            }
            if let Some(hit) = obstacle.cast_shape(cast)? {
                if nearest.map_or(true, |n| hit.distance < n.distance) {
                    nearest = Some(hit);
                }
            }
        }
        Ok(nearest)
    }
}

/// A backend that cannot answer.
#[derive(Debug, Clone, Default)]
pub struct FailingQuery;

impl ObstacleQuery for FailingQuery {
    fn cast_shape(&self, _cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
        Err(QueryError::new("collision scene unavailable"))
    }
}

/// Wraps a query and counts the casts it receives.
#[derive(Debug, Default)]
pub struct CountingQuery<Q> {
    inner: Q,
    casts: AtomicU32,
}

impl<Q> CountingQuery<Q> {
    /// Counts casts forwarded to `inner`.
    pub fn new(inner: Q) -> Self {
        Self {
            inner,
            casts: AtomicU32::new(0),
        }
    }

    /// Casts received so far.
    pub fn casts(&self) -> u32 {
        self.casts.load(Ordering::Relaxed)
    }
}

impl<Q: ObstacleQuery> ObstacleQuery for CountingQuery<Q> {
    fn cast_shape(&self, cast: &ShapeCast) -> Result<Option<ShapeCastHit>, QueryError> {
        self.casts.fetch_add(1, Ordering::Relaxed);
        self.inner.cast_shape(cast)
    }
}
