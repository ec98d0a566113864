//! Cell value formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::MISSING_PLACEHOLDER;

/// Visual emphasis of a cell or card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Nothing to worry about
    Neutral,
    /// Needs attention
    Alert,
    /// Caution-level values
    Warning,
    /// Informational values
    Info,
    /// Absent or placeholder values
    Muted,
    /// No emphasis
    Plain,
}

impl CellStyle {
    /// CSS class applied to the value.
    pub fn css_class(&self) -> &'static str {
        match self {
            CellStyle::Neutral => "text-success",
            CellStyle::Alert => "text-danger",
            CellStyle::Warning => "text-warning",
            CellStyle::Info => "text-info",
            CellStyle::Muted => "text-muted",
            CellStyle::Plain => "",
        }
    }
}

/// `93°C` for 93.0, `85.5°C` for 85.5, `N/A` when absent.
pub fn format_temperature(celsius: Option<f64>) -> String {
    match celsius {
        Some(t) => format!("{t}°C"),
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Day count with its unit and style.
///
/// Exactly one day is singular and neutral; every other count (including 0)
/// is plural and styled as an alert. An absent count is a muted placeholder.
pub fn format_duration(days: Option<i64>) -> (String, CellStyle) {
    match days {
        Some(1) => ("1 day".to_string(), CellStyle::Neutral),
        Some(n) => (format!("{n} days"), CellStyle::Alert),
        None => (MISSING_PLACEHOLDER.to_string(), CellStyle::Muted),
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Renders a backend timestamp as `MM/DD/YYYY`.
///
/// Values that do not parse are shown as received; absent values become `N/A`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return MISSING_PLACEHOLDER.to_string();
    };
    match parse_date(raw) {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Groups digits in threes: `28052` → `28,052`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
