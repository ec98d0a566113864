//! gpu_thermal_dashboard library: client for the GPU thermal analysis backend
//!
//! Submits a site/date-range query to the backend's `/api/analysis` endpoint,
//! renders the returned summary counters and throttled / thermally failed GPU
//! records into an HTML dashboard, and decorates every device address with a
//! best-effort hostname.
//!
//! # Example
//!
//! ```no_run
//! use gpu_thermal_dashboard::{run_dashboard, Config, DnsMode};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     base_url: "http://monitor:5000".to_string(),
//!     site: "DFW2".to_string(),
//!     dns_mode: DnsMode::Blocking,
//!     ..Default::default()
//! };
//!
//! let report = run_dashboard(config).await?;
//! println!("{} throttled, {} thermally failed GPUs",
//!          report.throttled_rows, report.thermally_failed_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod enrichment;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod page;
pub mod render;
pub mod resolver;
pub mod session;
pub mod submit;

// Re-export public API
pub use config::{AlertTypeFilter, Config, DnsBackend, DnsMode, LogFormat, LogLevel};
pub use run::{analysis_request, list_sites, run_dashboard, DashboardReport};

// Library entry points used by the CLI
mod run {
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use anyhow::{bail, Context, Result};
    use chrono::NaiveDate;
    use log::info;
    use tokio::io::AsyncWriteExt;

    use crate::config::Config;
    use crate::initialization::{init_client, init_hostname_resolver};
    use crate::models::{AnalysisRequest, SiteMap};
    use crate::session::{DashboardSession, QueryResult};
    use crate::submit::{default_date_range, FormValues, QuerySubmitter};

    /// Summary of one dashboard run.
    #[derive(Debug, Clone)]
    pub struct DashboardReport {
        /// Render generation of the written page
        pub generation: u64,
        /// Rows in the throttled table
        pub throttled_rows: usize,
        /// Rows in the thermally failed table
        pub thermally_failed_rows: usize,
        /// Hostname cells filled in
        pub hostnames_applied: usize,
        /// Report file, `None` when written to stdout
        pub output: Option<PathBuf>,
        /// Wall time of the whole run
        pub elapsed_seconds: f64,
    }

    /// Builds the analysis request from the configuration.
    ///
    /// Missing dates default to the seven days up to `today`.
    pub fn analysis_request(config: &Config, today: NaiveDate) -> AnalysisRequest {
        let (default_start, default_end) = default_date_range(today);
        AnalysisRequest {
            site: config.site.clone(),
            start_date: config.start_date.unwrap_or(default_start),
            end_date: config.end_date.unwrap_or(default_end),
            alert_type: config.alert_type,
            filters: config.filters.clone(),
        }
    }

    /// Runs one analysis query and writes the dashboard.
    ///
    /// In async DNS mode the report is written twice: once with hostname
    /// placeholders as soon as the results are rendered, and again when every
    /// lookup has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the client cannot be
    /// set up, the report cannot be written, or the analysis failed. In the
    /// last case the report (showing the error banner) is still written.
    pub async fn run_dashboard(config: Config) -> Result<DashboardReport> {
        config.validate().context("Invalid configuration")?;
        let start = Instant::now();

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let submitter = QuerySubmitter::new(client, &config.base_url)
            .context("Failed to initialize analysis endpoint")?;
        let resolver =
            init_hostname_resolver(&config).context("Failed to initialize hostname resolver")?;
        let mut session = DashboardSession::new(submitter, resolver, config.dns_mode)
            .with_max_concurrent_lookups(config.max_concurrent_lookups)
            .with_raw_output(config.print_raw_output);

        let request = analysis_request(&config, chrono::Local::now().date_naive());
        let form = FormValues::from(&request);
        let to_stdout = config.output.as_os_str() == "-";

        match session.run_query(&form, Some(&config.site)).await {
            QueryResult::Rendered {
                generation,
                pending,
                mut enrichment,
            } => {
                if !pending.is_empty() {
                    if !to_stdout {
                        write_report(&config.output, &session.to_html()).await?;
                        info!(
                            "Wrote preliminary report to {}, resolving {} hostnames",
                            config.output.display(),
                            pending.len()
                        );
                    }
                    enrichment = session.enrich(pending).await;
                }
                write_report(&config.output, &session.to_html()).await?;

                let (throttled_rows, thermally_failed_rows) = session
                    .page()
                    .results()
                    .map(|r| (r.throttled.rows.len(), r.thermally_failed.rows.len()))
                    .unwrap_or_default();

                Ok(DashboardReport {
                    generation,
                    throttled_rows,
                    thermally_failed_rows,
                    hostnames_applied: enrichment.applied,
                    output: (!to_stdout).then(|| config.output.clone()),
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                })
            }
            QueryResult::Failed(err) => {
                write_report(&config.output, &session.to_html()).await?;
                Err(anyhow::Error::new(err).context("Analysis did not complete"))
            }
            QueryResult::Skipped => bail!("An analysis is already running"),
        }
    }

    /// Fetches the sites known to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be set up or the request fails.
    pub async fn list_sites(config: &Config) -> Result<SiteMap> {
        let client = init_client(config).context("Failed to initialize HTTP client")?;
        let submitter = QuerySubmitter::new(client, &config.base_url)
            .context("Failed to initialize analysis endpoint")?;
        submitter
            .fetch_sites()
            .await
            .context("Failed to fetch site list")
    }

    async fn write_report(path: &Path, html: &str) -> Result<()> {
        if path.as_os_str() == "-" {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(html.as_bytes())
                .await
                .context("Failed to write report to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
            return Ok(());
        }
        tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}
