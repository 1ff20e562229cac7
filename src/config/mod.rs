//! Library configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, default ports, limits)
//! - The startup configuration struct and its enum types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{CheckerConfig, LogFormat, LogLevel};
