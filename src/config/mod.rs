//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint paths, timeouts, UI strings)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    AlertTypeFilter, Config, ConfigValidationError, DnsBackend, DnsMode, LogFormat, LogLevel,
};
