//! HTTP client initialization.
//!
//! The analysis request can run for minutes while hostname lookups must fail
//! fast, so two clients are built with different timeouts.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used for `/api/analysis` and `/api/sites`.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
}

/// Initializes the HTTP client used for `/api/dns-lookup`.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_lookup_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.dns_timeout_seconds))
        .connect_timeout(Duration::from_secs(config.dns_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
}

/// Joins an API path onto the backend base URL.
///
/// The base is treated as a directory even without a trailing slash, so
/// `http://host/monitor` + `api/analysis` gives `http://host/monitor/api/analysis`.
pub fn api_endpoint(base_url: &str, path: &str) -> Result<url::Url, url::ParseError> {
    let mut base = url::Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_endpoint_root_base() {
        let url = api_endpoint("http://127.0.0.1:5000", "api/analysis").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/analysis");
    }

    #[test]
    fn test_api_endpoint_keeps_base_path() {
        let url = api_endpoint("https://ops.example/monitor", "/api/dns-lookup").unwrap();
        assert_eq!(url.as_str(), "https://ops.example/monitor/api/dns-lookup");

        let url = api_endpoint("https://ops.example/monitor/", "api/sites").unwrap();
        assert_eq!(url.as_str(), "https://ops.example/monitor/api/sites");
    }

    #[test]
    fn test_api_endpoint_invalid_base() {
        assert!(api_endpoint("not a url", "api/analysis").is_err());
    }

    #[test]
    fn test_clients_build_with_defaults() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
        assert!(init_lookup_client(&config).is_ok());
    }
}
