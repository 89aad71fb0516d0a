//! Behavioural tests for turning-point velocity blending.
//!
//! A character starts at rest or at speed and holds an input for a number of
//! fixed steps; the recorded trace is checked against the bound curves.

use approx::assert_relative_eq;
use glam::DVec2;
use rstest::rstest;
use stride::controller::{StepPhase, VelocityController, VelocityPlan};
use stride::easing::EasingProfile;
use stride::settings::LocomotionSettings;

const DT: f64 = 0.02;

fn settings(acceleration: EasingProfile, deceleration: EasingProfile) -> LocomotionSettings {
    LocomotionSettings {
        top_speed: 5.0,
        time_to_top_speed: 0.5,
        acceleration_profile: acceleration,
        time_to_stop: 0.29,
        deceleration_profile: deceleration,
        ..LocomotionSettings::default()
    }
}

#[derive(Clone, Debug)]
struct Run {
    controller: VelocityController,
    trace: Vec<VelocityPlan>,
}

impl Run {
    fn new(velocity: DVec2) -> Self {
        let mut controller =
            VelocityController::new(&settings(EasingProfile::CubicOut, EasingProfile::QuadraticIn))
                .expect("valid settings");
        controller.set_velocity(velocity);
        Self {
            controller,
            trace: Vec::new(),
        }
    }

    fn hold(&mut self, input: DVec2, steps: usize) {
        for _ in 0..steps {
            let plan = self.controller.step(input, DT);
            self.trace.push(plan);
        }
    }

    fn speeds(&self) -> Vec<f64> {
        self.trace.iter().map(|plan| plan.velocity.length()).collect()
    }
}

#[test]
fn accelerating_from_rest() {
    rspec::run(&rspec::given(
        "a character at rest",
        Run::new(DVec2::ZERO),
        |ctx| {
            ctx.when("full input is held for a second", |ctx| {
                ctx.before_each(|run| run.hold(DVec2::X, 50));

                ctx.then("speed never decreases", |run| {
                    let speeds = run.speeds();
                    assert!(speeds.windows(2).all(|w| w[0] <= w[1] + 1e-12));
                });

                ctx.then("speed never exceeds the target", |run| {
                    assert!(run.speeds().iter().all(|s| *s <= 5.0 + 1e-9));
                });

                ctx.then("the character ends at the target velocity", |run| {
                    let v = run.controller.state().velocity;
                    assert_relative_eq!(v.x, 5.0, epsilon = 1e-9);
                    assert_relative_eq!(v.y, 0.0, epsilon = 1e-9);
                });
            });
        },
    ));
}

#[test]
fn releasing_input_at_top_speed() {
    rspec::run(&rspec::given(
        "a character at top speed",
        Run::new(DVec2::new(0.0, 5.0)),
        |ctx| {
            ctx.when("the input is released", |ctx| {
                ctx.before_each(|run| run.hold(DVec2::ZERO, 20));

                ctx.then("every step walks the deceleration curve", |run| {
                    let first = run.trace.first().expect("at least one step");
                    assert_eq!(first.phase, StepPhase::Decelerating);
                });

                ctx.then("the character stops within the stopping time", |run| {
                    let stopped = run
                        .speeds()
                        .iter()
                        .position(|s| *s == 0.0)
                        .expect("character should stop");
                    assert!(stopped < 16, "stopped after {} steps", stopped + 1);
                });

                ctx.then("the main direction is kept", |run| {
                    assert_eq!(run.controller.state().main_direction, DVec2::Y);
                });
            });
        },
    ));
}

#[test]
fn reversing_hands_off_leftover_time() {
    rspec::run(&rspec::given(
        "a character running along +x",
        Run::new(DVec2::new(5.0, 0.0)),
        |ctx| {
            ctx.when("the input flips to -x", |ctx| {
                ctx.before_each(|run| run.hold(DVec2::NEG_X, 60));

                ctx.then("exactly one step hands off between the curves", |run| {
                    let hand_offs = run
                        .trace
                        .iter()
                        .filter(|plan| plan.phase == StepPhase::HandOff)
                        .count();
                    assert_eq!(hand_offs, 1);
                });

                ctx.then("the hand-off spends the leftover time accelerating", |run| {
                    let index = run
                        .trace
                        .iter()
                        .position(|plan| plan.phase == StepPhase::HandOff)
                        .expect("hand-off step");
                    let before = run.trace[index - 1].velocity.x;
                    let binding = run.controller.binding();
                    let leftover = DT - binding.deceleration().curve_inverse(before);
                    let expected = -binding.acceleration().curve(leftover);
                    assert_relative_eq!(run.trace[index].velocity.x, expected, epsilon = 1e-9);
                });

                ctx.then("the character ends at full speed along -x", |run| {
                    assert_relative_eq!(run.controller.state().velocity.x, -5.0, epsilon = 1e-9);
                });
            });
        },
    ));
}

#[rstest]
#[case::cubic_out(EasingProfile::CubicOut)]
#[case::quadratic_in(EasingProfile::QuadraticIn)]
#[case::sine_in(EasingProfile::SineIn)]
#[case::circular_out(EasingProfile::CircularOut)]
#[case::quintic_in(EasingProfile::QuinticIn)]
#[case::exponential_out(EasingProfile::ExponentialOut)]
fn reaches_target_in_acceleration_time(#[case] profile: EasingProfile) {
    let mut controller =
        VelocityController::new(&settings(profile, EasingProfile::QuadraticIn))
            .expect("valid settings");
    let target = DVec2::new(5.0, 0.0);
    let mut steps = 0;
    while controller.state().velocity != target {
        let plan = controller.step(DVec2::X, DT);
        assert!(plan.velocity.length() <= 5.0 + 1e-9, "overshot at step {steps}");
        steps += 1;
        assert!(steps <= 26, "{profile} still short of target after {steps} steps");
    }
    assert!(steps >= 24, "{profile} reached target after only {steps} steps");
}

#[test]
fn turning_keeps_speed_on_the_curves() {
    let mut controller =
        VelocityController::new(&settings(EasingProfile::CubicOut, EasingProfile::QuadraticIn))
            .expect("valid settings");
    controller.set_velocity(DVec2::new(5.0, 0.0));
    for _ in 0..80 {
        let plan = controller.step(DVec2::Y, DT);
        assert!(plan.velocity.length() <= 5.0 + 1e-9);
    }
    let v = controller.state().velocity;
    assert_relative_eq!(v.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(v.y, 5.0, epsilon = 1e-9);
}
