//! Exit codes for the CLI

use hapsign_core::{ErrorCategory, HapsignError};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error (bad config file, decryption helper not on PATH)
pub const CONFIG_ERROR: i32 = 2;

/// Signing profile missing, unreadable or malformed
pub const INPUT_ERROR: i32 = 3;

/// Decryption helper failed
pub const HELPER_ERROR: i32 = 4;

/// Signing script could not be written
pub const OUTPUT_ERROR: i32 = 5;

/// Exit code for a failed run
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<HapsignError>() {
        Some(err) => match err.category() {
            ErrorCategory::Configuration => CONFIG_ERROR,
            ErrorCategory::Input => INPUT_ERROR,
            ErrorCategory::Subprocess => HELPER_ERROR,
            ErrorCategory::Output => OUTPUT_ERROR,
        },
        None => ERROR,
    }
}
