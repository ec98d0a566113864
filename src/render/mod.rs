//! Result rendering.
//!
//! Maps an analysis response into the three dashboard views: summary cards,
//! throttled rows and thermally-failed rows. Rendering is synchronous and
//! total: every input, however incomplete, produces a complete view. Hostname
//! cells that need a lookup are left pending and reported back as
//! [`PendingLookup`]s tagged with the render generation.

mod alerts;
mod format;
mod summary;

pub use alerts::{AlertRow, AlertSection, Column, HostnameCell};
pub use format::{format_duration, format_temperature, format_thousands, format_timestamp, CellStyle};
pub use summary::{summary_cards, AbsentPolicy, SummaryCard, SummaryField};

use crate::models::{AlertKind, AnalysisResponse};

/// The rendered results of one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResults {
    /// Render pass that produced these views
    pub generation: u64,
    /// Summary cards in display order
    pub summary: Vec<SummaryCard>,
    /// Throttled GPUs table
    pub throttled: AlertSection,
    /// Thermally failed GPUs table
    pub thermally_failed: AlertSection,
    /// Backend stdout, when the caller asked to keep it
    pub raw_output: Option<String>,
}

impl RenderedResults {
    /// Table for `kind`.
    pub fn section(&self, kind: AlertKind) -> &AlertSection {
        match kind {
            AlertKind::Throttled => &self.throttled,
            AlertKind::ThermallyFailed => &self.thermally_failed,
        }
    }

    /// Mutable table for `kind`.
    pub fn section_mut(&mut self, kind: AlertKind) -> &mut AlertSection {
        match kind {
            AlertKind::Throttled => &mut self.throttled,
            AlertKind::ThermallyFailed => &mut self.thermally_failed,
        }
    }

    /// Hostname cells still waiting for a lookup.
    pub fn pending_hostnames(&self) -> usize {
        [&self.throttled, &self.thermally_failed]
            .iter()
            .flat_map(|s| s.rows.iter())
            .filter(|r| r.hostname == HostnameCell::Pending)
            .count()
    }
}

/// A hostname lookup requested by a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    /// Render pass the row belongs to
    pub generation: u64,
    /// Table of the row
    pub kind: AlertKind,
    /// Row index within the section
    pub row: usize,
    /// Device address to resolve
    pub address: String,
}

/// Options of one render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Leave hostname cells pending and request lookups
    pub lookup_hostnames: bool,
    /// Keep the backend's raw output in the rendered results
    pub keep_raw_output: bool,
}

/// Renders `response` as generation `generation`.
///
/// A response without `results` renders as empty summary and empty lists.
/// Lookups are returned throttled rows first, each list in row order.
pub fn render_results(
    response: &AnalysisResponse,
    generation: u64,
    options: RenderOptions,
) -> (RenderedResults, Vec<PendingLookup>) {
    let results = response.results.clone().unwrap_or_default();

    let rendered = RenderedResults {
        generation,
        summary: summary_cards(results.summary.as_ref()),
        throttled: AlertSection::build(
            AlertKind::Throttled,
            &results.throttled,
            options.lookup_hostnames,
        ),
        thermally_failed: AlertSection::build(
            AlertKind::ThermallyFailed,
            &results.thermally_failed,
            options.lookup_hostnames,
        ),
        raw_output: if options.keep_raw_output {
            response.raw_output.clone()
        } else {
            None
        },
    };

    let pending = [&rendered.throttled, &rendered.thermally_failed]
        .into_iter()
        .flat_map(|section| {
            section
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.hostname == HostnameCell::Pending)
                .filter_map(move |(index, row)| {
                    row.device.as_ref().map(|address| PendingLookup {
                        generation,
                        kind: section.kind,
                        row: index,
                        address: address.clone(),
                    })
                })
        })
        .collect();

    log::debug!(
        "Rendered generation {generation}: {} throttled, {} thermally failed rows",
        rendered.throttled.rows.len(),
        rendered.thermally_failed.rows.len()
    );

    (rendered, pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> AnalysisResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_without_results_is_empty_but_complete() {
        let (rendered, pending) =
            render_results(&response(json!({"success": true})), 1, RenderOptions::default());
        assert_eq!(rendered.generation, 1);
        assert_eq!(rendered.summary.len(), 3);
        assert!(!rendered.throttled.has_findings());
        assert!(!rendered.thermally_failed.visible);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_render_requests_one_lookup_per_addressed_row() {
        let resp = response(json!({
            "success": true,
            "results": {
                "throttled": [
                    {"device": "10.4.11.38"},
                    {"gpu_id": "GPU_22"},
                    {"device": "10.4.11.38"}
                ],
                "thermally_failed": [{"device": "device-10.4.21.7"}]
            }
        }));
        let options = RenderOptions {
            lookup_hostnames: true,
            ..Default::default()
        };
        let (rendered, pending) = render_results(&resp, 7, options);

        // Same address twice means two lookups, no dedup
        assert_eq!(
            pending,
            vec![
                PendingLookup { generation: 7, kind: AlertKind::Throttled, row: 0, address: "10.4.11.38".into() },
                PendingLookup { generation: 7, kind: AlertKind::Throttled, row: 2, address: "10.4.11.38".into() },
                PendingLookup { generation: 7, kind: AlertKind::ThermallyFailed, row: 0, address: "10.4.21.7".into() },
            ]
        );
        assert_eq!(rendered.pending_hostnames(), 3);
    }

    #[test]
    fn test_raw_output_kept_only_on_request() {
        let resp = response(json!({"success": true, "raw_output": "Summary:"}));
        let (rendered, _) = render_results(&resp, 1, RenderOptions::default());
        assert_eq!(rendered.raw_output, None);

        let options = RenderOptions {
            keep_raw_output: true,
            ..Default::default()
        };
        let (rendered, _) = render_results(&resp, 1, options);
        assert_eq!(rendered.raw_output.as_deref(), Some("Summary:"));
    }
}
