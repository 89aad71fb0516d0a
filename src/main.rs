//! Headless driver that prints the velocity trace produced by a settings file.
//!
//! Each line of output is a JSON object describing one fixed step. The input
//! is held for `--hold` steps and then released so both the acceleration and
//! deceleration curves show up in the trace.
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::{DVec2, DVec3};
use log::info;
use serde::Serialize;
use stride::avoidance::ObstacleQuery;
use stride::{init_logging, EasingProfile, LocomotionController, LocomotionSettings, StepPhase};

/// Simulate a character's velocity under constant input
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON settings file; defaults are used when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Override the acceleration profile, e.g. `sine_out`
    #[arg(long)]
    acceleration: Option<EasingProfile>,
    /// Override the deceleration profile, e.g. `quadratic_in`
    #[arg(long)]
    deceleration: Option<EasingProfile>,
    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 60)]
    steps: u32,
    /// Steps during which the input is held
    #[arg(long, default_value_t = 30)]
    hold: u32,
    /// Fixed timestep in seconds
    #[arg(long, default_value_t = 0.02)]
    timestep: f64,
    /// Input along the world x axis
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    input_x: f64,
    /// Input along the world z axis
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    input_z: f64,
}

#[derive(Serialize)]
struct TraceRow {
    step: u32,
    time: f64,
    phase: String,
    velocity: [f64; 3],
    speed: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = match &args.settings {
        Some(path) => LocomotionSettings::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LocomotionSettings::default(),
    };
    if let Some(profile) = args.acceleration {
        settings.acceleration_profile = profile;
    }
    if let Some(profile) = args.deceleration {
        settings.deceleration_profile = profile;
    }
    info!(
        "simulating {} steps of {}s with {} acceleration and {} deceleration",
        args.steps, args.timestep, settings.acceleration_profile, settings.deceleration_profile
    );

    let mut controller = LocomotionController::new(settings).context("invalid settings")?;
    let input = DVec2::new(args.input_x, args.input_z);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for step in 0..args.steps {
        let held = if step < args.hold { input } else { DVec2::ZERO };
        let report = controller.step::<dyn ObstacleQuery>(held, args.timestep, DVec3::ZERO, None);
        let row = TraceRow {
            step,
            time: f64::from(step + 1) * args.timestep,
            phase: phase_name(report.phase).to_owned(),
            velocity: report.velocity.to_array(),
            speed: report.velocity.length(),
        };
        writeln!(out, "{}", serde_json::to_string(&row)?)?;
    }

    info!(
        "final speed {:.3}",
        controller.state().velocity.length()
    );
    Ok(())
}

const fn phase_name(phase: StepPhase) -> &'static str {
    match phase {
        StepPhase::Holding => "holding",
        StepPhase::Accelerating => "accelerating",
        StepPhase::Decelerating => "decelerating",
        StepPhase::Reversing => "reversing",
        StepPhase::HandOff => "hand_off",
    }
}
