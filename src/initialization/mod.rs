//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP clients (analysis and hostname lookup)
//! - DNS resolver
//! - Hostname resolver matching the configured backend

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::{api_endpoint, init_client, init_lookup_client};
pub use logger::init_logger_with;
pub use resolver::init_resolver;

use crate::config::{Config, DnsBackend, DnsMode, DNS_LOOKUP_PATH};
use crate::error_handling::InitializationError;
use crate::resolver::HostnameResolver;

/// Builds the hostname resolver described by the configuration.
///
/// `DnsMode::Off` yields a disabled resolver regardless of the backend.
///
/// # Errors
///
/// Returns an error if the lookup client cannot be built or the lookup
/// endpoint cannot be derived from the base URL.
pub fn init_hostname_resolver(config: &Config) -> Result<HostnameResolver, InitializationError> {
    let resolver = match (config.dns_mode, config.dns_backend) {
        (DnsMode::Off, _) => HostnameResolver::disabled(),
        (_, DnsBackend::Http) => {
            let client = init_lookup_client(config)?;
            let endpoint = api_endpoint(&config.base_url, DNS_LOOKUP_PATH)?;
            HostnameResolver::http(client, endpoint)
        }
        (_, DnsBackend::Dns) => HostnameResolver::dns(init_resolver(config.dns_timeout_seconds)),
    };
    Ok(resolver.with_domain_suffix(&config.domain_suffix))
}
