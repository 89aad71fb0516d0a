//! End-to-end locomotion steps against test scenes.

use glam::{DVec2, DVec3};
use rstest::{fixture, rstest};
use stride::avoidance::{AvoidanceOutcome, ObstacleQuery};
use stride::locomotion::{LocomotionController, StepReport};
use stride::settings::LocomotionSettings;
use test_utils::{assert_vec3_near, heading_degrees, CountingQuery, FailingQuery, PlaneWall, Scene};

const DT: f64 = 0.02;

#[fixture]
fn controller() -> LocomotionController {
    LocomotionController::new(LocomotionSettings::default()).expect("valid defaults")
}

fn wall_at(x: f64) -> PlaneWall {
    PlaneWall::new(DVec3::new(x, 0.0, 0.0), DVec3::NEG_X)
}

/// Runs `steps` steps of `input` from rest, integrating position.
fn run<Q>(
    mut controller: LocomotionController,
    input: DVec2,
    steps: usize,
    scene: Option<&Q>,
) -> Vec<StepReport>
where
    Q: ObstacleQuery + ?Sized,
{
    let mut position = DVec3::ZERO;
    (0..steps)
        .map(|_| {
            let report = controller.step(input, DT, position, scene);
            position += report.velocity * DT;
            report
        })
        .collect()
}

#[rstest]
fn failing_backend_moves_like_an_empty_world(controller: LocomotionController) {
    let input = heading_degrees(60.0);
    let without = run::<dyn ObstacleQuery>(controller.clone(), input, 30, None);
    let failing = run(controller, input, 30, Some(&FailingQuery));
    for (a, b) in without.iter().zip(&failing) {
        assert_eq!(a.velocity, b.velocity);
        assert_eq!(a.phase, b.phase);
    }
    assert!(failing
        .iter()
        .all(|report| report.avoidance == AvoidanceOutcome::Clear));
}

#[rstest]
fn masked_scene_is_never_avoided(controller: LocomotionController) {
    let scene = Scene::new().with(0, wall_at(1.0));
    let reports = run(controller, DVec2::X, 40, Some(&scene));
    assert!(reports
        .iter()
        .all(|report| report.avoidance == AvoidanceOutcome::Clear));
}

#[rstest]
fn look_ahead_grows_with_speed(mut controller: LocomotionController) {
    let wall = wall_at(1.5);
    let start = controller.step(DVec2::X, DT, DVec3::ZERO, Some(&wall));
    assert_eq!(start.avoidance, AvoidanceOutcome::Clear);

    controller.sync_velocity(DVec3::new(6.0, 0.0, 0.0));
    let running = controller.step(DVec2::X, DT, DVec3::ZERO, Some(&wall));
    assert_eq!(running.avoidance, AvoidanceOutcome::Intended);
}

#[rstest]
fn idle_character_never_queries(controller: LocomotionController) {
    let counting = CountingQuery::new(wall_at(1.0));
    let reports = run(controller, DVec2::ZERO, 20, Some(&counting));
    assert_eq!(counting.casts(), 0);
    assert!(reports
        .iter()
        .all(|report| report.velocity == DVec3::ZERO));
}

#[rstest]
fn velocity_stays_on_the_ground_plane(controller: LocomotionController) {
    let input = heading_degrees(135.0);
    let reports = run::<dyn ObstacleQuery>(controller, input, 40, None);
    let last = reports.last().expect("at least one step");
    let expected = DVec3::new(input.x, 0.0, input.y) * 6.0;
    assert_vec3_near(last.velocity, expected, 1e-9);
    assert!(reports.iter().all(|report| report.velocity.y == 0.0));
}
