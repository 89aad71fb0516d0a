//! Utility helpers for tests.
//!
//! Obstacles here are vertical and unbounded in height, so sweeping a
//! capsule against them reduces to sweeping a circle on the ground plane.
//! Every scene implements [`ObstacleQuery`] with exact answers, which keeps
//! avoidance tests free of a physics engine.

pub mod scenes;

use glam::{DVec2, DVec3};

pub use scenes::{CountingQuery, FailingQuery, Pillar, PlaneWall, Scene, WallSegment};
pub use stride::avoidance::ObstacleQuery;

/// Assert that two planar vectors agree within `epsilon`.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `epsilon`.
pub fn assert_vec2_near(actual: DVec2, expected: DVec2, epsilon: f64) {
    assert!(
        actual.abs_diff_eq(expected, epsilon),
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}

/// Assert that two world-space vectors agree within `epsilon`.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `epsilon`.
pub fn assert_vec3_near(actual: DVec3, expected: DVec3, epsilon: f64) {
    assert!(
        actual.abs_diff_eq(expected, epsilon),
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}

/// Unit planar vector at `degrees` counter-clockwise from world `+x`.
///
/// # Examples
/// ```
/// use test_utils::heading_degrees;
/// let north = heading_degrees(90.0);
/// assert!((north.y - 1.0).abs() < 1e-12);
/// ```
pub fn heading_degrees(degrees: f64) -> glam::DVec2 {
    DVec2::from_angle(degrees.to_radians())
}
