//! One dashboard: submitter, page and hostname resolver wired together.

use std::time::Instant;

use log::info;

use crate::config::DnsMode;
use crate::enrichment::{enrich_page, EnrichmentStats};
use crate::error_handling::SubmitError;
use crate::page::{DashboardPage, PageControls};
use crate::render::{PendingLookup, RenderOptions};
use crate::resolver::HostnameResolver;
use crate::submit::{FormValues, QuerySubmitter, SubmitOutcome};

/// Result of [`DashboardSession::run_query`].
#[derive(Debug)]
pub enum QueryResult {
    /// Results are on the page. `pending` holds the lookups still to run
    /// (always empty in blocking and off modes).
    Rendered {
        /// Generation of the rendered results
        generation: u64,
        /// Lookups left to run
        pending: Vec<PendingLookup>,
        /// Lookups already applied
        enrichment: EnrichmentStats,
    },
    /// The analysis failed; the page shows an error banner.
    Failed(SubmitError),
    /// A query was already running.
    Skipped,
}

/// Submitter, page and resolver of one dashboard.
#[derive(Debug)]
pub struct DashboardSession {
    submitter: QuerySubmitter,
    resolver: HostnameResolver,
    page: DashboardPage,
    dns_mode: DnsMode,
    max_concurrent_lookups: usize,
    keep_raw_output: bool,
}

impl DashboardSession {
    /// Session with the default lookup limit and no raw output.
    pub fn new(submitter: QuerySubmitter, resolver: HostnameResolver, dns_mode: DnsMode) -> Self {
        DashboardSession {
            submitter,
            resolver,
            page: DashboardPage::new(),
            dns_mode,
            max_concurrent_lookups: crate::config::DEFAULT_MAX_CONCURRENT_LOOKUPS,
            keep_raw_output: false,
        }
    }

    /// Caps lookups in flight; 0 is treated as 1.
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    /// Keeps the backend's raw output on the page.
    pub fn with_raw_output(mut self, keep: bool) -> Self {
        self.keep_raw_output = keep;
        self
    }

    /// The rendered page.
    pub fn page(&self) -> &DashboardPage {
        &self.page
    }

    /// The query submitter.
    pub fn submitter(&self) -> &QuerySubmitter {
        &self.submitter
    }

    /// Snapshot of the page controls.
    pub fn controls(&self) -> PageControls {
        self.submitter.controls()
    }

    /// Current page as HTML.
    pub fn to_html(&self) -> String {
        let now = Instant::now();
        self.submitter.dismiss_expired_banners(now);
        self.page.to_html(&self.submitter.controls(), now)
    }

    /// Submits the form and renders a successful response.
    ///
    /// In blocking mode hostname lookups finish before this returns; in async
    /// mode they are handed back for [`DashboardSession::enrich`].
    pub async fn run_query(&mut self, form: &FormValues, site_override: Option<&str>) -> QueryResult {
        let response = match self.submitter.submit(form, site_override).await {
            SubmitOutcome::Completed(response) => response,
            SubmitOutcome::Failed(err) => return QueryResult::Failed(err),
            SubmitOutcome::Skipped => return QueryResult::Skipped,
        };

        let options = RenderOptions {
            lookup_hostnames: self.dns_mode != DnsMode::Off && self.resolver.is_enabled(),
            keep_raw_output: self.keep_raw_output,
        };
        let pass = self.page.render(&response, options);
        info!(
            "Rendered results (generation {}), {} hostname lookups pending",
            pass.generation,
            pass.pending.len()
        );

        match self.dns_mode {
            DnsMode::Blocking => {
                let enrichment = self.enrich(pass.pending).await;
                QueryResult::Rendered {
                    generation: pass.generation,
                    pending: Vec::new(),
                    enrichment,
                }
            }
            DnsMode::Async | DnsMode::Off => QueryResult::Rendered {
                generation: pass.generation,
                pending: pass.pending,
                enrichment: EnrichmentStats::default(),
            },
        }
    }

    /// Runs lookups from a render pass and patches the page as they complete.
    pub async fn enrich(&mut self, pending: Vec<PendingLookup>) -> EnrichmentStats {
        enrich_page(
            &mut self.page,
            &self.resolver,
            pending,
            self.max_concurrent_lookups,
        )
        .await
    }
}
