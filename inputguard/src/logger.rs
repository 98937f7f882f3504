// inputguard/src/logger.rs
//! Logger setup for the `inputguard` binary.
//!
//! Logs go to stderr so they never mix with sanitized output on stdout.
//! `RUST_LOG` is honored unless a level is forced by `--debug` or `--quiet`.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Default filter when neither `RUST_LOG` nor a CLI flag says otherwise.
const DEFAULT_FILTER: &str = "warn";

/// Initializes `env_logger` once. Later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    // A logger may already be installed (tests, embedding).
    let _ = builder.try_init();
}
