//! Query submission.
//!
//! [`QuerySubmitter`] sends one analysis request at a time. While a request
//! is outstanding further submissions are skipped, not queued. The page
//! controls (loading indicator, submit button) are switched to their busy
//! state for the duration of the request and restored afterwards on every
//! path.

mod query;
mod state;

pub use query::{build_query, default_date_range, FormValues};
pub use state::RequestState;

use log::{debug, info, warn};

use crate::config::{ANALYSIS_PATH, SITES_PATH};
use crate::error_handling::{InitializationError, SubmitError};
use crate::initialization::api_endpoint;
use crate::models::{AnalysisResponse, SiteMap};
use crate::page::PageControls;

use state::SharedState;

/// What became of one call to [`QuerySubmitter::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend reported success; the response is ready to render.
    Completed(Box<AnalysisResponse>),
    /// No results; an error banner was raised.
    Failed(SubmitError),
    /// Another request was outstanding; nothing was sent.
    Skipped,
}

/// Issues analysis requests against the backend.
#[derive(Debug)]
pub struct QuerySubmitter {
    client: reqwest::Client,
    analysis_url: url::Url,
    sites_url: url::Url,
    state: SharedState,
}

impl QuerySubmitter {
    /// Creates a submitter for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URLs cannot be derived from `base_url`.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, InitializationError> {
        Ok(QuerySubmitter {
            client,
            analysis_url: api_endpoint(base_url, ANALYSIS_PATH)?,
            sites_url: api_endpoint(base_url, SITES_PATH)?,
            state: SharedState::default(),
        })
    }

    /// Current request state.
    pub fn request_state(&self) -> RequestState {
        self.state.lock().request
    }

    /// Snapshot of the page controls.
    pub fn controls(&self) -> PageControls {
        self.state.lock().controls.clone()
    }

    /// Drops error banners past their display time.
    pub fn dismiss_expired_banners(&self, now: std::time::Instant) -> usize {
        self.state.lock().controls.dismiss_expired(now)
    }

    /// Submits `form`, with `site_override` taking precedence over any form `site`.
    ///
    /// Returns [`SubmitOutcome::Skipped`] without any network traffic when a
    /// previous submission is still outstanding.
    pub async fn submit(&self, form: &FormValues, site_override: Option<&str>) -> SubmitOutcome {
        let Some(guard) = self.state.begin() else {
            debug!("Analysis already running, ignoring submission");
            return SubmitOutcome::Skipped;
        };

        let query = build_query(form, site_override);
        info!("Running analysis: {query}");
        let result = self.fetch_analysis(&query).await;
        guard.completing();

        let outcome = match result {
            Ok(response) if response.success => {
                guard.show_results();
                SubmitOutcome::Completed(Box::new(response))
            }
            Ok(response) => {
                if let Some(stderr) = response.stderr.as_deref() {
                    debug!("Backend stderr: {stderr}");
                }
                let err = SubmitError::Rejected {
                    message: response.error,
                };
                warn!("{err}");
                guard.raise_error(&err.user_message());
                SubmitOutcome::Failed(err)
            }
            Err(err) => {
                warn!("{err}");
                guard.raise_error(&err.user_message());
                SubmitOutcome::Failed(err)
            }
        };
        drop(guard);
        outcome
    }

    /// Sends the request and decodes the body whatever the status: the
    /// backend reports rejections as `{ "error": ... }` with a 4xx/5xx code.
    async fn fetch_analysis(&self, query: &str) -> Result<AnalysisResponse, SubmitError> {
        let mut url = self.analysis_url.clone();
        url.set_query(Some(query).filter(|q| !q.is_empty()));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Analysis response: HTTP {status}, {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches the backend's site list.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx status or an undecodable body.
    pub async fn fetch_sites(&self) -> Result<SiteMap, SubmitError> {
        let response = self
            .client
            .get(self.sites_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
