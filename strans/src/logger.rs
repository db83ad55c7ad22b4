// strans/src/logger.rs
//! Logging setup for the CLI.
//!
//! Logs always go to stderr so that stdout carries nothing but transformed text.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// With `Some(level)` the `strans` and `strans_core` targets are forced to that
/// level (`Off` silences everything). With `None`, `RUST_LOG` decides and the
/// default is `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match level {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            builder.filter_module("strans", level).filter_module("strans_core", level);
        }
        None => {}
    }
    builder.format_timestamp(None).target(Target::Stderr);
    // A logger may already be installed (e.g. by a test harness).
    let _ = builder.try_init();
}
