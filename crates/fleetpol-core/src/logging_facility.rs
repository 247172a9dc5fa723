//! Structured logging facility
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use fleetpol_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::from_env());
//! ```

use std::time::Instant;

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, PROFILE_ENV_VAR};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

/// Whole milliseconds since `started`, saturating at `u64::MAX`
pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
