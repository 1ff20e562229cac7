//! IP address helpers.
//!
//! This module provides:
//! - Canonical text for raw 16-byte IPv6 addresses (zero-run compression)
//! - Length checks for raw address data returned by the resolver
//! - The [`AddressFamily`] type shared by the resolver and the prober

mod canonical;
mod family;

// Re-export public API
pub use canonical::{
    ipv6_to_text, ipv6_to_text_with, is_valid_ipv4, is_valid_ipv6, CompressionPolicy, IPV4_LEN,
    IPV6_LEN,
};
pub use family::AddressFamily;
