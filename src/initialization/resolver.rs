//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::debug;

/// Initializes the DNS resolver used for PTR lookups of device addresses.
///
/// Prefers the system configuration, since fleet PTR records usually live on
/// an internal DNS server; falls back to the public default configuration when
/// the system one cannot be read.
pub fn init_resolver(timeout_secs: u64) -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(timeout_secs);
    opts.attempts = 2;
    opts.ndots = 0;

    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _)) => config,
        Err(e) => {
            debug!("System resolver configuration unavailable ({e}), using defaults");
            ResolverConfig::default()
        }
    };

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
