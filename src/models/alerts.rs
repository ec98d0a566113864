//! Alert record types.
//!
//! The backend emits two loosely related record shapes. Each gets its own
//! strict type with explicit optional fields; the [`AlertRecord`] trait gives
//! the renderer one view over both.

use serde::Deserialize;

use super::lenient;

/// Which alert list a record or table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// GPUs that reported thermal throttling in the window
    Throttled,
    /// GPUs that crossed the thermal failure threshold
    ThermallyFailed,
}

impl AlertKind {
    /// Stable identifier used in element ids and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Throttled => "throttled",
            AlertKind::ThermallyFailed => "thermally-failed",
        }
    }

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Throttled => "Throttled GPUs",
            AlertKind::ThermallyFailed => "Thermally Failed GPUs",
        }
    }

    /// Text of the single placeholder row shown for an empty list.
    pub fn empty_message(&self) -> &'static str {
        match self {
            AlertKind::Throttled => "No throttled GPUs found",
            AlertKind::ThermallyFailed => "No thermally failed GPUs found",
        }
    }
}

/// Read-only view shared by both alert shapes.
pub trait AlertRecord {
    /// Site identifier, e.g. `DFW2`.
    fn site(&self) -> Option<&str>;
    /// Cluster within the site.
    fn cluster(&self) -> Option<&str>;
    /// Raw device field as sent by the backend.
    fn device(&self) -> Option<&str>;
    /// GPU slot, e.g. `GPU_23`.
    fn gpu_id(&self) -> Option<&str>;
    /// Temperature reading in °C.
    fn temperature(&self) -> Option<f64>;
    /// Earliest timestamp of the condition.
    fn first_seen(&self) -> Option<&str>;
    /// Latest timestamp of the condition.
    fn last_seen(&self) -> Option<&str>;
    /// Number of days the condition was observed.
    fn duration_days(&self) -> Option<i64>;
    /// Alerts raised for the GPU; `None` means one.
    fn alert_count(&self) -> Option<u64>;

    /// Device address with legacy `device-` naming stripped.
    fn device_address(&self) -> Option<String> {
        self.device().and_then(normalize_device)
    }
}

/// A throttled GPU, aggregated over the window.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThrottledAlert {
    /// Site identifier
    #[serde(default, deserialize_with = "lenient::string")]
    pub site: Option<String>,
    /// Cluster name
    #[serde(default, deserialize_with = "lenient::string")]
    pub cluster: Option<String>,
    /// Device address, possibly `device-` prefixed
    #[serde(default, deserialize_with = "lenient::string")]
    pub device: Option<String>,
    /// GPU slot
    #[serde(default, deserialize_with = "lenient::string")]
    pub gpu_id: Option<String>,
    /// Highest reading in °C
    #[serde(default, deserialize_with = "lenient::float")]
    pub max_temp: Option<f64>,
    /// First throttled sample
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_date: Option<String>,
    /// Last throttled sample
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_date: Option<String>,
    /// Distinct days with throttling
    #[serde(default, deserialize_with = "lenient::integer")]
    pub days_throttled: Option<i64>,
    /// Throttle events in the window
    #[serde(default, deserialize_with = "lenient::count")]
    pub alert_count: Option<u64>,
}

/// A thermally failed GPU.
///
/// Older backends send `temp` and a single `timestamp` instead of
/// `max_temp`/`first_date`; both spellings are kept and the accessors prefer
/// the newer one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThermalFailureAlert {
    /// Site identifier
    #[serde(default, deserialize_with = "lenient::string")]
    pub site: Option<String>,
    /// Cluster name
    #[serde(default, deserialize_with = "lenient::string")]
    pub cluster: Option<String>,
    /// Device address, possibly `device-` prefixed
    #[serde(default, deserialize_with = "lenient::string")]
    pub device: Option<String>,
    /// GPU slot
    #[serde(default, deserialize_with = "lenient::string")]
    pub gpu_id: Option<String>,
    /// Highest reading in °C
    #[serde(default, deserialize_with = "lenient::float")]
    pub max_temp: Option<f64>,
    /// Reading in °C (older backends)
    #[serde(default, deserialize_with = "lenient::float")]
    pub temp: Option<f64>,
    /// Average reading in °C
    #[serde(default, deserialize_with = "lenient::float")]
    pub avg_temp: Option<f64>,
    /// First failing sample
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_date: Option<String>,
    /// Sample time (older backends)
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,
    /// Last failing sample
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_date: Option<String>,
    /// Distinct days above the failure threshold
    #[serde(default, deserialize_with = "lenient::integer")]
    pub days_failed: Option<i64>,
    /// Failure events in the window
    #[serde(default, deserialize_with = "lenient::count")]
    pub alert_count: Option<u64>,
}

impl AlertRecord for ThrottledAlert {
    fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }
    fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }
    fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }
    fn gpu_id(&self) -> Option<&str> {
        self.gpu_id.as_deref()
    }
    fn temperature(&self) -> Option<f64> {
        self.max_temp
    }
    fn first_seen(&self) -> Option<&str> {
        self.first_date.as_deref()
    }
    fn last_seen(&self) -> Option<&str> {
        self.last_date.as_deref()
    }
    fn duration_days(&self) -> Option<i64> {
        self.days_throttled
    }
    fn alert_count(&self) -> Option<u64> {
        self.alert_count
    }
}

impl AlertRecord for ThermalFailureAlert {
    fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }
    fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }
    fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }
    fn gpu_id(&self) -> Option<&str> {
        self.gpu_id.as_deref()
    }
    fn temperature(&self) -> Option<f64> {
        self.max_temp.or(self.temp)
    }
    fn first_seen(&self) -> Option<&str> {
        self.first_date.as_deref().or(self.timestamp.as_deref())
    }
    fn last_seen(&self) -> Option<&str> {
        self.last_date.as_deref()
    }
    fn duration_days(&self) -> Option<i64> {
        self.days_failed
    }
    fn alert_count(&self) -> Option<u64> {
        self.alert_count
    }
}

/// Strips the legacy `device-` prefix (`device-10.4.1.1` → `10.4.1.1`).
///
/// Returns `None` for a blank device field.
pub fn normalize_device(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let address = trimmed.strip_prefix("device-").unwrap_or(trimmed).trim();
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}
