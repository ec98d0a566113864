//! Wire types for the analysis backend.
//!
//! Everything the backend sends is decoded here, at the boundary, into types
//! with explicit optional fields. Decoding never fails on a missing or
//! mistyped field; only a body that is not a JSON object at all is an error.

mod alerts;
mod lenient;
mod summary;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::AlertTypeFilter;

pub use alerts::{normalize_device, AlertKind, AlertRecord, ThermalFailureAlert, ThrottledAlert};
pub use summary::Summary;

/// One analysis query, as entered on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Site identifier
    pub site: String,
    /// First day of the window
    pub start_date: NaiveDate,
    /// Last day of the window, inclusive
    pub end_date: NaiveDate,
    /// Restricts the alert lists returned
    pub alert_type: Option<AlertTypeFilter>,
    /// Additional backend filters, sent after the standard fields
    pub filters: Vec<(String, String)>,
}

/// Body of `GET /api/analysis`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResponse {
    /// Whether the analysis ran
    #[serde(default, deserialize_with = "lenient::flag")]
    pub success: bool,
    /// Results of a successful analysis
    #[serde(default, deserialize_with = "lenient::object")]
    pub results: Option<AnalysisResults>,
    /// Analysis stdout, for troubleshooting
    #[serde(default, deserialize_with = "lenient::string")]
    pub raw_output: Option<String>,
    /// Failure message
    #[serde(default, deserialize_with = "lenient::string")]
    pub error: Option<String>,
    /// Analysis stderr on backend failures
    #[serde(default, deserialize_with = "lenient::string")]
    pub stderr: Option<String>,
    /// Echo of the requested parameters
    #[serde(default, deserialize_with = "lenient::string")]
    pub site: Option<String>,
    /// Echo of the requested start date
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    /// Echo of the requested end date
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
    /// Echo of the requested alert filter
    #[serde(default, deserialize_with = "lenient::string")]
    pub alert_type: Option<String>,
}

/// The `results` object of a successful analysis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisResults {
    /// Counters; absent when the backend sent none
    #[serde(default, deserialize_with = "lenient::object")]
    pub summary: Option<Summary>,
    /// Throttled GPUs in backend order
    #[serde(default, deserialize_with = "lenient::records")]
    pub throttled: Vec<ThrottledAlert>,
    /// Thermally failed GPUs in backend order
    #[serde(default, deserialize_with = "lenient::records")]
    pub thermally_failed: Vec<ThermalFailureAlert>,
}

/// One entry of `GET /api/sites`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteInfo {
    /// Display name
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    /// Device subnet, e.g. `10.4.0.0/16`
    #[serde(default, deserialize_with = "lenient::string")]
    pub subnet: Option<String>,
    /// Free-form description
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

/// Body of `GET /api/sites`, keyed by site identifier.
pub type SiteMap = BTreeMap<String, SiteInfo>;

/// Body of `GET /api/dns-lookup`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnsLookupReply {
    /// `Some(true)` when a name was found
    #[serde(default)]
    pub success: Option<bool>,
    /// Fully qualified hostname
    #[serde(default)]
    pub hostname: Option<String>,
}
