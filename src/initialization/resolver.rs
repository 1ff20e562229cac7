//! DNS resolver initialization.
//!
//! This module builds the plain and validating resolver contexts from the
//! configured resolv.conf and checks the configured trust anchor.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::parse_resolv_conf;

use crate::config::CheckerConfig;
use crate::dns::HickoryBackend;
use crate::error_handling::InitializationError;

/// Initializes the DNS backend used by all checks.
///
/// Upstream servers come from `config.resolv_conf` when set, otherwise from
/// the resolver library's defaults. Timeouts and attempts always come from
/// `config`.
///
/// # Errors
///
/// - `InitializationError::ResolverConfigError` if the resolv.conf file cannot
///   be read
/// - `InitializationError::ResolverConfigParseError` if it is not valid
///   resolv.conf
/// - `InitializationError::TrustAnchorError` if the trust anchor file cannot
///   be read or holds no root key material
pub fn init_resolver(config: &CheckerConfig) -> Result<Arc<HickoryBackend>, InitializationError> {
    let (resolver_config, mut opts) = match &config.resolv_conf {
        Some(path) => read_resolv_conf(path)?,
        None => (ResolverConfig::default(), ResolverOpts::default()),
    };

    if let Some(path) = &config.trust_anchor {
        check_trust_anchor(path)?;
    }

    opts.timeout = config.dns_timeout;
    opts.attempts = config.dns_attempts;

    Ok(Arc::new(HickoryBackend::new(resolver_config, opts)))
}

fn read_resolv_conf(path: &Path) -> Result<(ResolverConfig, ResolverOpts), InitializationError> {
    let path_text = || path.display().to_string();
    let data = fs::read(path).map_err(|source| InitializationError::ResolverConfigError {
        path: path_text(),
        source,
    })?;
    parse_resolv_conf(data).map_err(|source| InitializationError::ResolverConfigParseError {
        path: path_text(),
        source,
    })
}

/// Checks that `path` holds a root zone DS or DNSKEY record.
///
/// Validation itself uses the IANA root key built into `hickory-proto`; the
/// file only has to be a readable root anchor so that a misconfigured path is
/// reported at startup instead of silently validating nothing.
pub fn check_trust_anchor(path: &Path) -> Result<(), InitializationError> {
    let to_error = |reason: String| InitializationError::TrustAnchorError {
        path: path.display().to_string(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
    if contents.lines().any(is_root_key_line) {
        log::debug!("Using trust anchor {}", path.display());
        Ok(())
    } else {
        Err(to_error("no root DS or DNSKEY record".to_string()))
    }
}

/// Matches presentation-format lines such as
/// `. 172800 IN DS 20326 8 2 E06D...` or `. IN DNSKEY 257 3 8 AwEAAa...`.
fn is_root_key_line(line: &str) -> bool {
    let line = line.split(';').next().unwrap_or_default();
    let mut fields = line.split_whitespace();
    if fields.next() != Some(".") {
        return false;
    }
    fields.any(|field| field.eq_ignore_ascii_case("DS") || field.eq_ignore_ascii_case("DNSKEY"))
}
