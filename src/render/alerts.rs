//! Alert table rows.

use strum_macros::EnumIter;

use crate::config::{RESOLVING_PLACEHOLDER, UNKNOWN_PLACEHOLDER};
use crate::models::{AlertKind, AlertRecord};

use super::format::{format_duration, format_temperature, format_timestamp, CellStyle};

/// Table columns, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Column {
    /// Site identifier
    Site,
    /// Cluster name
    Cluster,
    /// Device address, linked
    Device,
    /// Resolved hostname
    Hostname,
    /// GPU slot
    Gpu,
    /// Temperature reading
    Temperature,
    /// First sample date
    FirstSeen,
    /// Last sample date
    LastSeen,
    /// Day count
    Duration,
    /// Alert count badge
    Alerts,
}

impl Column {
    /// Column heading; temperature and duration depend on the table.
    pub fn header(&self, kind: AlertKind) -> &'static str {
        match self {
            Column::Site => "Site",
            Column::Cluster => "Cluster",
            Column::Device => "Device",
            Column::Hostname => "Hostname",
            Column::Gpu => "GPU",
            Column::Temperature => match kind {
                AlertKind::Throttled => "Max Temp",
                AlertKind::ThermallyFailed => "Temp",
            },
            Column::FirstSeen => "First Seen",
            Column::LastSeen => "Last Seen",
            Column::Duration => match kind {
                AlertKind::Throttled => "Days Throttled",
                AlertKind::ThermallyFailed => "Days Failed",
            },
            Column::Alerts => "Alerts",
        }
    }
}

/// State of a row's hostname cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostnameCell {
    /// Lookup outstanding
    Pending,
    /// Final text: the hostname, or the address when resolution failed
    Resolved(String),
}

impl HostnameCell {
    /// Text shown in the cell.
    pub fn text(&self) -> &str {
        match self {
            HostnameCell::Pending => RESOLVING_PLACEHOLDER,
            HostnameCell::Resolved(name) => name,
        }
    }
}

/// One rendered alert row. Every field is already display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    /// Site, or `Unknown`
    pub site: String,
    /// Cluster, or `Unknown`
    pub cluster: String,
    /// Device address; `None` when the record has none
    pub device: Option<String>,
    /// Hostname cell state
    pub hostname: HostnameCell,
    /// GPU slot, or `Unknown`
    pub gpu_id: String,
    /// Formatted reading, e.g. `93°C`
    pub temperature: String,
    /// Emphasis of the reading
    pub temperature_style: CellStyle,
    /// `MM/DD/YYYY` or the raw value
    pub first_seen: String,
    /// `MM/DD/YYYY` or the raw value
    pub last_seen: String,
    /// Day count with unit
    pub duration: String,
    /// Emphasis of the day count
    pub duration_style: CellStyle,
    /// Alert badge value
    pub alert_count: u64,
}

impl AlertRow {
    /// Builds a row from a record. `lookup_hostnames` decides whether the
    /// hostname cell waits for a lookup or repeats the address.
    pub fn from_record<R: AlertRecord>(kind: AlertKind, record: &R, lookup_hostnames: bool) -> Self {
        let device = record.device_address();
        let hostname = match &device {
            Some(_) if lookup_hostnames => HostnameCell::Pending,
            Some(address) => HostnameCell::Resolved(address.clone()),
            None => HostnameCell::Resolved(UNKNOWN_PLACEHOLDER.to_string()),
        };
        let (duration, duration_style) = format_duration(record.duration_days());

        AlertRow {
            site: or_unknown(record.site()),
            cluster: or_unknown(record.cluster()),
            device,
            hostname,
            gpu_id: or_unknown(record.gpu_id()),
            temperature: format_temperature(record.temperature()),
            temperature_style: match kind {
                AlertKind::Throttled => CellStyle::Alert,
                AlertKind::ThermallyFailed => CellStyle::Warning,
            },
            first_seen: format_timestamp(record.first_seen()),
            last_seen: format_timestamp(record.last_seen()),
            duration,
            duration_style,
            alert_count: record.alert_count().unwrap_or(1),
        }
    }

    /// Display text of one column.
    pub fn cell_text(&self, column: Column) -> String {
        match column {
            Column::Site => self.site.clone(),
            Column::Cluster => self.cluster.clone(),
            Column::Device => self
                .device
                .clone()
                .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
            Column::Hostname => self.hostname.text().to_string(),
            Column::Gpu => self.gpu_id.clone(),
            Column::Temperature => self.temperature.clone(),
            Column::FirstSeen => self.first_seen.clone(),
            Column::LastSeen => self.last_seen.clone(),
            Column::Duration => self.duration.clone(),
            Column::Alerts => self.alert_count.to_string(),
        }
    }

    /// Display text of every column, in column order.
    pub fn cells(&self) -> Vec<String> {
        use strum::IntoEnumIterator;
        Column::iter().map(|c| self.cell_text(c)).collect()
    }
}

/// One alert table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSection {
    /// Which list this is
    pub kind: AlertKind,
    /// Whether the section container is shown
    pub visible: bool,
    /// Data rows in input order; empty means the "no findings" placeholder
    pub rows: Vec<AlertRow>,
}

impl AlertSection {
    /// Builds the section for `records`.
    ///
    /// An empty thermally-failed list hides its section; an empty throttled
    /// list stays visible with its placeholder row.
    pub fn build<R: AlertRecord>(kind: AlertKind, records: &[R], lookup_hostnames: bool) -> Self {
        let rows: Vec<AlertRow> = records
            .iter()
            .map(|record| AlertRow::from_record(kind, record, lookup_hostnames))
            .collect();
        let visible = !(rows.is_empty() && kind == AlertKind::ThermallyFailed);
        AlertSection { kind, visible, rows }
    }

    /// Whether the table has data rows.
    pub fn has_findings(&self) -> bool {
        !self.rows.is_empty()
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_PLACEHOLDER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThermalFailureAlert, ThrottledAlert};

    fn dfw2_record() -> ThrottledAlert {
        ThrottledAlert {
            site: Some("DFW2".into()),
            cluster: Some("C1".into()),
            device: Some("10.4.11.38".into()),
            gpu_id: Some("GPU_23".into()),
            max_temp: Some(93.0),
            first_date: Some("2025-07-25 00:00:00".into()),
            last_date: Some("2025-07-25 16:00:00".into()),
            days_throttled: Some(1),
            alert_count: Some(3),
        }
    }

    #[test]
    fn test_row_cells_in_column_order() {
        let row = AlertRow::from_record(AlertKind::Throttled, &dfw2_record(), false);
        assert_eq!(
            row.cells(),
            vec![
                "DFW2",
                "C1",
                "10.4.11.38",
                "10.4.11.38",
                "GPU_23",
                "93°C",
                "07/25/2025",
                "07/25/2025",
                "1 day",
                "3"
            ]
        );
        assert_eq!(row.duration_style, CellStyle::Neutral);
    }

    #[test]
    fn test_row_pending_hostname_when_lookups_enabled() {
        let row = AlertRow::from_record(AlertKind::Throttled, &dfw2_record(), true);
        assert_eq!(row.hostname, HostnameCell::Pending);
        assert_eq!(row.cell_text(Column::Hostname), "Resolving...");
    }

    #[test]
    fn test_row_defaults_for_empty_record() {
        let row = AlertRow::from_record(AlertKind::ThermallyFailed, &ThermalFailureAlert::default(), true);
        assert_eq!(
            row.cells(),
            vec!["Unknown", "Unknown", "Unknown", "Unknown", "Unknown", "N/A", "N/A", "N/A", "N/A", "1"]
        );
        // No address, nothing to look up
        assert!(matches!(row.hostname, HostnameCell::Resolved(_)));
        assert_eq!(row.duration_style, CellStyle::Muted);
    }

    #[test]
    fn test_section_keeps_input_order() {
        let records: Vec<ThrottledAlert> = (0..5)
            .map(|i| ThrottledAlert {
                device: Some(format!("10.4.11.{i}")),
                days_throttled: Some(i),
                ..Default::default()
            })
            .collect();
        let section = AlertSection::build(AlertKind::Throttled, &records, false);
        assert_eq!(section.rows.len(), 5);
        for (i, row) in section.rows.iter().enumerate() {
            assert_eq!(row.device.as_deref(), Some(format!("10.4.11.{i}").as_str()));
        }
        assert_eq!(section.rows[0].duration, "0 days");
        assert_eq!(section.rows[0].duration_style, CellStyle::Alert);
        assert_eq!(section.rows[2].duration, "2 days");
    }

    #[test]
    fn test_empty_sections_visibility() {
        let throttled = AlertSection::build::<ThrottledAlert>(AlertKind::Throttled, &[], true);
        assert!(throttled.visible);
        assert!(!throttled.has_findings());

        let failed =
            AlertSection::build::<ThermalFailureAlert>(AlertKind::ThermallyFailed, &[], true);
        assert!(!failed.visible);
        assert!(!failed.has_findings());
    }

    #[test]
    fn test_headers_follow_kind() {
        assert_eq!(Column::Duration.header(AlertKind::Throttled), "Days Throttled");
        assert_eq!(Column::Duration.header(AlertKind::ThermallyFailed), "Days Failed");
        assert_eq!(Column::Temperature.header(AlertKind::ThermallyFailed), "Temp");
    }
}
