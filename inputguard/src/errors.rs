// inputguard/src/errors.rs
//! Errors that map to a dedicated process exit code.

use inputguard_core::BlockReason;
use thiserror::Error;

/// Exit code for I/O, parse and configuration failures.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for `trace --fail-on-block` when a guard fired.
pub const EXIT_BLOCKED: u8 = 2;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input was blocked by the {} stage", .0.stage())]
    GuardBlocked(BlockReason),

    #[error("`--request` requires `--format json`")]
    RequestNeedsJson,
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::GuardBlocked(_) => EXIT_BLOCKED,
            CliError::RequestNeedsJson => EXIT_FAILURE,
        }
    }
}
