//! The dashboard page.
//!
//! [`DashboardPage`] owns the rendered results and the render generation.
//! Each call to [`DashboardPage::render`] starts a new generation; hostname
//! updates carry the generation that requested them and are applied only
//! while it is still current, so a lookup that outlives its render pass can
//! never write into the rows of a newer one.

mod controls;
mod html;

pub use controls::{ErrorBanner, PageControls, SubmitButton};
pub use html::{escape_html, render_document};

use std::time::Instant;

use log::debug;

use crate::models::{AlertKind, AnalysisResponse};
use crate::render::{render_results, HostnameCell, PendingLookup, RenderOptions, RenderedResults};

/// A finished hostname lookup for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameUpdate {
    /// Render pass that requested the lookup
    pub generation: u64,
    /// Table of the row
    pub kind: AlertKind,
    /// Row index within the table
    pub row: usize,
    /// Text for the hostname cell
    pub hostname: String,
}

/// Result of applying a [`HostnameUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The cell was updated
    Applied,
    /// The update belongs to an older render pass
    Stale,
    /// No such row in the current results
    UnknownRow,
}

/// One render pass: its generation and the lookups it scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPass {
    /// Generation of the new results
    pub generation: u64,
    /// Hostname lookups to run for this pass
    pub pending: Vec<PendingLookup>,
}

/// Rendered results of the latest analysis and their generation.
#[derive(Debug, Default)]
pub struct DashboardPage {
    generation: u64,
    results: Option<RenderedResults>,
}

impl DashboardPage {
    /// Empty page, before any analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the results currently shown (0 before the first render).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Results of the latest render, if any.
    pub fn results(&self) -> Option<&RenderedResults> {
        self.results.as_ref()
    }

    /// Replaces the shown results with a fresh render of `response`.
    pub fn render(&mut self, response: &AnalysisResponse, options: RenderOptions) -> RenderPass {
        self.generation += 1;
        let (results, pending) = render_results(response, self.generation, options);
        self.results = Some(results);
        RenderPass {
            generation: self.generation,
            pending,
        }
    }

    /// Writes a resolved hostname into its row if the update is still current.
    pub fn apply_hostname(&mut self, update: &HostnameUpdate) -> UpdateOutcome {
        if update.generation != self.generation {
            debug!(
                "Discarding hostname for {} row {} from generation {} (current {})",
                update.kind.as_str(),
                update.row,
                update.generation,
                self.generation
            );
            return UpdateOutcome::Stale;
        }
        let Some(results) = self.results.as_mut() else {
            return UpdateOutcome::UnknownRow;
        };
        match results.section_mut(update.kind).rows.get_mut(update.row) {
            Some(row) => {
                row.hostname = HostnameCell::Resolved(update.hostname.clone());
                UpdateOutcome::Applied
            }
            None => UpdateOutcome::UnknownRow,
        }
    }

    /// Serializes the page together with `controls`.
    pub fn to_html(&self, controls: &PageControls, now: Instant) -> String {
        render_document(controls, self.results.as_ref(), now)
    }
}
