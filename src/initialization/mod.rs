//! Library initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - DNS resolver contexts (plain and validating)
//! - The [`DomainChecker`] built on top of them

mod logger;
mod resolver;

use anyhow::{Context, Result};

use crate::checker::DomainChecker;
use crate::config::CheckerConfig;
use crate::reach::ReachabilityProber;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{check_trust_anchor, init_resolver};

/// Initializes the logger from `config.log_level` and `config.log_format`.
///
/// # Errors
///
/// Fails if a logger has already been installed in this process.
pub fn init_logger(config: &CheckerConfig) -> Result<()> {
    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")
}

/// Builds a [`DomainChecker`] from `config`.
///
/// The resolver contexts are created once here and shared by every check the
/// returned checker runs.
///
/// # Errors
///
/// Returns an error if the resolver configuration or trust anchor cannot be
/// loaded.
pub fn init_checker(config: &CheckerConfig) -> Result<DomainChecker> {
    let backend = init_resolver(config).context("Failed to initialize DNS resolver")?;
    let prober = ReachabilityProber::from_config(config);
    log::debug!(
        "Checker ready: ping mode {:?}, probe timeout {}s, {} concurrent probes",
        config.ping_mode,
        config.probe_timeout.as_secs(),
        config.max_concurrent_probes
    );
    Ok(DomainChecker::new(backend, prober, config))
}
