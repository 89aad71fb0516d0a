//! Logger set-up for the simulation binary and tests.
//!
//! The library only emits records through the `log` macros; installing a
//! logger is left to the application.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default level when `RUST_LOG` is unset.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Otherwise `verbose` selects debug output,
/// which includes the controller's phase transitions and avoidance outcomes.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
