//! Summary metric cards.
//!
//! Card policy per counter when the backend omits it:
//!
//! | counter              | label             | absent                 |
//! |----------------------|-------------------|------------------------|
//! | `planned_gpu_nodes`  | GPU Nodes         | `N/A` placeholder card |
//! | `planned_total_gpus` | Total GPUs        | `N/A` placeholder card |
//! | `total_devices`      | GPU Devices Found | `0`, muted (also for 0) |
//! | `throttled_count`    | Throttled         | omitted                |
//! | `suspicious_count`   | Failed            | omitted                |
//!
//! `Failed` falls back to the older `thermally_failed_count` key.
//! | `total_records`      | Records           | omitted                |

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::MISSING_PLACEHOLDER;
use crate::models::Summary;

use super::format::{format_thousands, CellStyle};

/// Recognized summary counters, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SummaryField {
    /// `planned_gpu_nodes`
    GpuNodes,
    /// `planned_total_gpus`
    TotalGpus,
    /// `total_devices`
    DevicesFound,
    /// `throttled_count`
    Throttled,
    /// `suspicious_count`
    Failed,
    /// `total_records`
    Records,
}

/// What to show when a counter is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentPolicy {
    /// Show the card with `N/A`
    Placeholder,
    /// Show the card with `0`
    Zero,
    /// Leave the card out
    Omit,
}

impl SummaryField {
    /// Card caption.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryField::GpuNodes => "GPU Nodes",
            SummaryField::TotalGpus => "Total GPUs",
            SummaryField::DevicesFound => "GPU Devices Found",
            SummaryField::Throttled => "Throttled",
            SummaryField::Failed => "Failed",
            SummaryField::Records => "Records",
        }
    }

    /// CSS class of the card.
    pub fn css_class(&self) -> &'static str {
        match self {
            SummaryField::GpuNodes => "summary-gpu-nodes",
            SummaryField::TotalGpus => "summary-total-gpus",
            SummaryField::DevicesFound => "summary-gpu-found",
            SummaryField::Throttled => "summary-throttled",
            SummaryField::Failed => "summary-thermally-failed",
            SummaryField::Records => "summary-records",
        }
    }

    /// Font Awesome icon class.
    pub fn icon(&self) -> &'static str {
        match self {
            SummaryField::GpuNodes => "fa-microchip",
            SummaryField::TotalGpus => "fa-server",
            SummaryField::DevicesFound => "fa-search",
            SummaryField::Throttled => "fa-fire",
            SummaryField::Failed => "fa-exclamation-triangle",
            SummaryField::Records => "fa-chart-line",
        }
    }

    /// What the card shows when the counter is missing.
    pub fn absent_policy(&self) -> AbsentPolicy {
        match self {
            SummaryField::GpuNodes | SummaryField::TotalGpus => AbsentPolicy::Placeholder,
            SummaryField::DevicesFound => AbsentPolicy::Zero,
            SummaryField::Throttled | SummaryField::Failed | SummaryField::Records => {
                AbsentPolicy::Omit
            }
        }
    }

    /// Style of a present value. No devices found reads like a missing count.
    fn style_for(&self, value: u64) -> CellStyle {
        match (self, value) {
            (SummaryField::DevicesFound, 0) => CellStyle::Muted,
            _ => self.present_style(),
        }
    }

    fn present_style(&self) -> CellStyle {
        match self {
            SummaryField::GpuNodes => CellStyle::Neutral,
            SummaryField::TotalGpus | SummaryField::Records => CellStyle::Info,
            SummaryField::DevicesFound | SummaryField::Failed => CellStyle::Warning,
            SummaryField::Throttled => CellStyle::Alert,
        }
    }

    fn value(&self, summary: &Summary) -> Option<u64> {
        match self {
            SummaryField::GpuNodes => summary.planned_gpu_nodes,
            SummaryField::TotalGpus => summary.planned_total_gpus,
            SummaryField::DevicesFound => summary.total_devices,
            SummaryField::Throttled => summary.throttled_count,
            SummaryField::Failed => summary.failed_count(),
            SummaryField::Records => summary.total_records,
        }
    }

    fn format_value(&self, value: u64) -> String {
        match self {
            SummaryField::Records => format_thousands(value),
            _ => value.to_string(),
        }
    }
}

/// One rendered metric card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    /// Counter shown
    pub field: SummaryField,
    /// Display value
    pub value: String,
    /// Style of the card's icon
    pub style: CellStyle,
}

/// Builds the cards for `summary`, applying each counter's absent policy.
///
/// A missing summary object is treated like one with every counter absent.
pub fn summary_cards(summary: Option<&Summary>) -> Vec<SummaryCard> {
    let empty = Summary::default();
    let summary = summary.unwrap_or(&empty);

    SummaryField::iter()
        .filter_map(|field| match field.value(summary) {
            Some(value) => Some(SummaryCard {
                field,
                value: field.format_value(value),
                style: field.style_for(value),
            }),
            None => match field.absent_policy() {
                AbsentPolicy::Placeholder => Some(SummaryCard {
                    field,
                    value: MISSING_PLACEHOLDER.to_string(),
                    style: CellStyle::Muted,
                }),
                AbsentPolicy::Zero => Some(SummaryCard {
                    field,
                    value: "0".to_string(),
                    style: CellStyle::Muted,
                }),
                AbsentPolicy::Omit => None,
            },
        })
        .collect()
}
