//! domain_health library: DNS and reachability health checks for domains
//!
//! This library checks whether a domain's name servers and mail exchangers
//! have IPv4/IPv6 addresses and answer on them, and whether the domain's
//! DNSSEC deployment validates.
//!
//! # Example
//!
//! ```no_run
//! use domain_health::models::HostGroup;
//! use domain_health::{init_checker, AddressFamily, CheckerConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = init_checker(&CheckerConfig::default())?;
//!
//! let map = checker
//!     .host_addresses("example.com", HostGroup::Ns, AddressFamily::V6)
//!     .await?;
//! println!("{}", serde_json::to_string(&map)?);
//!
//! let posture = checker.dnssec("example.com").await;
//! println!("DNSSEC valid: {}", posture.is_valid());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod address;
mod checker;
pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;
pub mod models;
pub mod reach;

// Re-export public API
pub use address::{ipv6_to_text, AddressFamily, CompressionPolicy};
pub use checker::{Check, DomainChecker};
pub use config::{CheckerConfig, LogFormat, LogLevel};
pub use error_handling::{DnsCheckError, InitializationError};
pub use initialization::{init_checker, init_logger};
