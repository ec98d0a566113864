//! Configuration constants.
//!
//! This module defines the defaults used by the CLI and the library, along with
//! the backend endpoint paths and the fixed UI strings of the dashboard.

use std::time::Duration;

/// Default analysis backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Site queried when none is given.
pub const DEFAULT_SITE: &str = "DFW2";

/// Domain suffix stripped from resolved hostnames.
///
/// Fleet hosts resolve as `<name>.voltagepark.net`; only `<name>` is shown.
pub const DEFAULT_DOMAIN_SUFFIX: &str = "voltagepark.net";

/// Number of days covered by the default date range (today minus this, up to today).
pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// Default report output path.
pub const DEFAULT_OUTPUT_PATH: &str = "gpu_thermal_report.html";

// Endpoint paths, relative to the base URL
/// Analysis endpoint.
pub const ANALYSIS_PATH: &str = "api/analysis";
/// Hostname lookup endpoint, queried with `?ip=`.
pub const DNS_LOOKUP_PATH: &str = "api/dns-lookup";
/// Site list endpoint.
pub const SITES_PATH: &str = "api/sites";

// Network operation timeouts
/// Analysis request timeout in seconds.
/// The backend runs the RRD analysis synchronously and gives up after 5 minutes,
/// so the client waits slightly longer than that.
pub const ANALYSIS_TIMEOUT_SECS: u64 = 310;
/// Per-lookup timeout in seconds for hostname resolution
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Upper bound on hostname lookups in flight at once.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 16;

/// How long an error banner stays on the page before it is dismissed.
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(10);

/// Default User-Agent string for backend requests.
pub const DEFAULT_USER_AGENT: &str = concat!("gpu_thermal_dashboard/", env!("CARGO_PKG_VERSION"));

// User-visible messages
/// Banner text when no analysis response could be obtained.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";
/// Banner text when the backend rejects the analysis without a message.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";

// Submit button labels
/// Submit button label while idle.
pub const SUBMIT_LABEL: &str = "Run Analysis";
/// Submit button label while a request is outstanding.
pub const SUBMIT_RUNNING_LABEL: &str = "Running...";

// Cell placeholders
/// Shown for site, cluster and GPU when the record lacks them.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";
/// Shown for absent numeric readings and timestamps.
pub const MISSING_PLACEHOLDER: &str = "N/A";
/// Hostname cell text while its lookup is outstanding.
pub const RESOLVING_PLACEHOLDER: &str = "Resolving...";
