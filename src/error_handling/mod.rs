//! Error handling.
//!
//! This module provides the error types of the library:
//! - **DNS check errors**: resolution failures, malformed address data and
//!   missing NS records. These propagate to the caller.
//! - **Initialization errors**: logger and resolver setup failures.
//!
//! Probe failures (ping timeouts, refused connections) are deliberately not
//! represented; they become `false`/absent fields in the probe results.

mod types;

// Re-export public API
pub use types::{DnsCheckError, InitializationError};
