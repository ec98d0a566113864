//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    ANALYSIS_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_DOMAIN_SUFFIX,
    DEFAULT_MAX_CONCURRENT_LOOKUPS, DEFAULT_OUTPUT_PATH, DEFAULT_SITE, DEFAULT_USER_AGENT,
    DNS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How hostname cells are filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DnsMode {
    /// Rows are rendered with a placeholder and patched as lookups complete.
    Async,
    /// Lookups complete before the page is handed out.
    Blocking,
    /// No lookups; the hostname cell repeats the device address.
    Off,
}

/// Where hostnames come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DnsBackend {
    /// The backend's `/api/dns-lookup` endpoint
    Http,
    /// A PTR lookup through the local resolver
    Dns,
}

/// Which alert lists the backend should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlertTypeFilter {
    /// Throttled GPUs only
    Throttled,
    /// Thermally failed GPUs only
    #[value(name = "thermally_failed")]
    ThermallyFailed,
    /// Both lists
    Both,
}

impl AlertTypeFilter {
    /// Value sent as the `alert_type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTypeFilter::Throttled => "throttled",
            AlertTypeFilter::ThermallyFailed => "thermally_failed",
            AlertTypeFilter::Both => "both",
        }
    }
}

/// Command-line options and library configuration.
///
/// # Examples
///
/// ```bash
/// # Last 7 days for the default site
/// gpu_thermal_dashboard --base-url http://monitor:5000
///
/// # Explicit window, waiting for every hostname before writing the report
/// gpu_thermal_dashboard --site DFW2 --start-date 2025-07-18 --end-date 2025-07-25 \
///     --dns-mode blocking --output dfw2.html
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gpu_thermal_dashboard",
    about = "Queries the GPU thermal analysis backend and renders the results as an HTML dashboard."
)]
pub struct Config {
    /// Base URL of the analysis backend
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Site identifier (overrides any `site` filter)
    #[arg(long, default_value = DEFAULT_SITE)]
    pub site: String,

    /// First day of the window (YYYY-MM-DD, default: 7 days ago)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Restrict the backend to one alert list
    #[arg(long, value_enum)]
    pub alert_type: Option<AlertTypeFilter>,

    /// Extra query filter passed through to the backend (KEY=VALUE, repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// HTML report path, or `-` for stdout
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Hostname enrichment mode: async|blocking|off
    #[arg(long, value_enum, default_value_t = DnsMode::Async)]
    pub dns_mode: DnsMode,

    /// Hostname source: http|dns
    #[arg(long, value_enum, default_value_t = DnsBackend::Http)]
    pub dns_backend: DnsBackend,

    /// Domain suffix stripped from resolved hostnames (empty keeps full names)
    #[arg(long, default_value = DEFAULT_DOMAIN_SUFFIX)]
    pub domain_suffix: String,

    /// Analysis request timeout in seconds
    #[arg(long, default_value_t = ANALYSIS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Per-lookup hostname timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_seconds: u64,

    /// Maximum hostname lookups in flight
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_LOOKUPS)]
    pub max_concurrent_lookups: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Include the backend's raw analysis output in the report
    #[arg(long)]
    pub print_raw_output: bool,

    /// List the sites known to the backend and exit
    #[arg(long)]
    pub list_sites: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site: DEFAULT_SITE.to_string(),
            start_date: None,
            end_date: None,
            alert_type: None,
            filters: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            dns_mode: DnsMode::Async,
            dns_backend: DnsBackend::Http,
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            timeout_seconds: ANALYSIS_TIMEOUT_SECS,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            print_raw_output: false,
            list_sites: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl Config {
    /// Checks option values that clap cannot check on its own.
    ///
    /// Date ordering is deliberately left to the backend.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!(
                        "unsupported scheme '{}', expected http or https",
                        parsed.scheme()
                    ),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!("'{}' is not a valid URL ({e})", self.base_url),
                })
            }
        }

        if self.site.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "site",
                message: "must not be empty".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.dns_timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "dns_timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_concurrent_lookups == 0 {
            return Err(ConfigValidationError {
                field: "max_concurrent_lookups",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a `KEY=VALUE` filter argument.
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("filter key is empty in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
