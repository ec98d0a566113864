//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `gpu_thermal_dashboard` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use gpu_thermal_dashboard::initialization::init_logger_with;
use gpu_thermal_dashboard::{list_sites, run_dashboard, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env next to the working directory may carry RUST_LOG
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if config.list_sites {
        return match list_sites(&config).await {
            Ok(sites) => {
                for (id, site) in &sites {
                    println!(
                        "{id}\t{}\t{}",
                        site.subnet.as_deref().unwrap_or("-"),
                        site.description.as_deref().unwrap_or("")
                    );
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("gpu_thermal_dashboard error: {:#}", e);
                process::exit(1);
            }
        };
    }

    match run_dashboard(config).await {
        Ok(report) => {
            let findings = report.throttled_rows + report.thermally_failed_rows;
            let summary = format!(
                "✅ {} throttled, {} thermally failed GPU{} ({} hostnames resolved) in {:.1}s",
                report.throttled_rows,
                report.thermally_failed_rows,
                if findings == 1 { "" } else { "s" },
                report.hostnames_applied,
                report.elapsed_seconds
            );
            // Keep stdout clean for the HTML when writing there
            match &report.output {
                Some(path) => {
                    println!("{summary}");
                    println!("Report saved in {}", path.display());
                }
                None => eprintln!("{summary}"),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("gpu_thermal_dashboard error: {:#}", e);
            process::exit(1);
        }
    }
}
