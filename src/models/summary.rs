//! Summary counters of an analysis.

use serde::Deserialize;

use super::lenient;

/// Counters reported alongside the alert lists. All are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    /// Nodes the site is provisioned for
    #[serde(default, deserialize_with = "lenient::count")]
    pub planned_gpu_nodes: Option<u64>,
    /// GPUs the site is provisioned for
    #[serde(default, deserialize_with = "lenient::count")]
    pub planned_total_gpus: Option<u64>,
    /// GPU devices with data in the window
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_devices: Option<u64>,
    /// GPUs that throttled in the window
    #[serde(default, deserialize_with = "lenient::count")]
    pub throttled_count: Option<u64>,
    /// Thermally failed devices; the backend calls them "suspicious"
    #[serde(default, deserialize_with = "lenient::count")]
    pub suspicious_count: Option<u64>,
    /// Older spelling of `suspicious_count`
    #[serde(default, deserialize_with = "lenient::count")]
    pub thermally_failed_count: Option<u64>,
    /// GPUs with no findings
    #[serde(default, deserialize_with = "lenient::count")]
    pub normal_count: Option<u64>,
    /// RRD records processed by the analysis
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_records: Option<u64>,
    /// Alerts across both lists
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_alerts: Option<u64>,
}

impl Summary {
    /// Thermally failed devices under either key, preferring `suspicious_count`.
    pub fn failed_count(&self) -> Option<u64> {
        self.suspicious_count.or(self.thermally_failed_count)
    }
}
