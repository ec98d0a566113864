//! Hostname resolution for device addresses.
//!
//! [`HostnameResolver::resolve`] always yields something printable: the bare
//! hostname on success, the unchanged address on any failure. Failures are
//! logged and never returned. There is no cache; every call performs a fresh
//! lookup.

use std::net::IpAddr;
use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};
use thiserror::Error;

use crate::models::DnsLookupReply;

/// Why a lookup produced no hostname.
#[derive(Debug, Error)]
enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("lookup reported failure")]
    Unsuccessful,
    #[error("empty hostname")]
    Empty,
    #[error("not an IP address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),
    #[error("DNS error: {0}")]
    Dns(#[from] hickory_resolver::error::ResolveError),
    #[error("lookup disabled")]
    Disabled,
}

#[derive(Clone)]
enum Backend {
    Http {
        client: reqwest::Client,
        endpoint: url::Url,
    },
    Dns(Arc<TokioAsyncResolver>),
    Disabled,
}

/// Resolves device addresses to display hostnames.
///
/// Cheap to clone; clones share the underlying HTTP client or DNS resolver.
#[derive(Clone)]
pub struct HostnameResolver {
    backend: Backend,
    /// Lower-cased, without leading or trailing dots
    domain_suffix: Option<String>,
}

impl std::fmt::Debug for HostnameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            Backend::Http { endpoint, .. } => format!("http({endpoint})"),
            Backend::Dns(_) => "dns".to_string(),
            Backend::Disabled => "disabled".to_string(),
        };
        f.debug_struct("HostnameResolver")
            .field("backend", &backend)
            .field("domain_suffix", &self.domain_suffix)
            .finish()
    }
}

impl HostnameResolver {
    /// Looks hostnames up through the backend's `/api/dns-lookup` endpoint.
    pub fn http(client: reqwest::Client, endpoint: url::Url) -> Self {
        HostnameResolver {
            backend: Backend::Http { client, endpoint },
            domain_suffix: None,
        }
    }

    /// Looks hostnames up with PTR queries.
    pub fn dns(resolver: Arc<TokioAsyncResolver>) -> Self {
        HostnameResolver {
            backend: Backend::Dns(resolver),
            domain_suffix: None,
        }
    }

    /// Never looks anything up; every address resolves to itself.
    pub fn disabled() -> Self {
        HostnameResolver {
            backend: Backend::Disabled,
            domain_suffix: None,
        }
    }

    /// Sets the domain suffix stripped from resolved names. Empty disables stripping.
    pub fn with_domain_suffix(mut self, suffix: &str) -> Self {
        let normalized = suffix.trim().trim_matches('.').to_ascii_lowercase();
        self.domain_suffix = (!normalized.is_empty()).then_some(normalized);
        self
    }

    /// Whether lookups are performed at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, Backend::Disabled)
    }

    /// Resolves `address` to a bare hostname, or returns it unchanged.
    pub async fn resolve(&self, address: &str) -> String {
        match self.lookup(address).await {
            Ok(name) => match self.strip_suffix(&name) {
                Some(bare) => bare,
                None => {
                    debug!("Hostname for {address} is empty after suffix removal ({name})");
                    address.to_string()
                }
            },
            Err(LookupError::Disabled) => address.to_string(),
            Err(e @ (LookupError::Transport(_) | LookupError::Dns(_))) => {
                warn!("Hostname lookup for {address} failed: {e}");
                address.to_string()
            }
            Err(e) => {
                debug!("No hostname for {address}: {e}");
                address.to_string()
            }
        }
    }

    async fn lookup(&self, address: &str) -> Result<String, LookupError> {
        match &self.backend {
            Backend::Http { client, endpoint } => {
                let response = client
                    .get(endpoint.clone())
                    .query(&[("ip", address)])
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LookupError::Status(status));
                }
                let body = response.text().await?;
                let reply: DnsLookupReply = serde_json::from_str(&body)?;
                match (reply.success, reply.hostname) {
                    (Some(true), Some(name)) if !name.trim().is_empty() => Ok(name),
                    (Some(true), _) => Err(LookupError::Empty),
                    _ => Err(LookupError::Unsuccessful),
                }
            }
            Backend::Dns(resolver) => {
                let ip: IpAddr = address.parse()?;
                let response = resolver.reverse_lookup(ip).await?;
                response
                    .iter()
                    .next()
                    .map(|name| name.to_utf8())
                    .filter(|name| !name.trim().is_empty())
                    .ok_or(LookupError::Empty)
            }
            Backend::Disabled => Err(LookupError::Disabled),
        }
    }

    /// Removes the root dot and the configured suffix; `None` if nothing is left.
    fn strip_suffix(&self, name: &str) -> Option<String> {
        let name = name.trim().trim_end_matches('.');
        let bare = match &self.domain_suffix {
            Some(suffix) => match name
                .len()
                .checked_sub(suffix.len())
                .filter(|&split| split > 0 && name.is_char_boundary(split))
            {
                Some(split) => {
                    let (head, tail) = name.split_at(split);
                    match head.strip_suffix('.') {
                        Some(host) if tail.eq_ignore_ascii_case(suffix) => host,
                        _ => name,
                    }
                }
                None => name,
            },
            None => name,
        };
        (!bare.is_empty()).then(|| bare.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_suffix(suffix: &str) -> HostnameResolver {
        HostnameResolver::disabled().with_domain_suffix(suffix)
    }

    #[test]
    fn test_strip_known_suffix() {
        let resolver = with_suffix(".voltagepark.net");
        assert_eq!(
            resolver.strip_suffix("gpu-node-038.voltagepark.net").as_deref(),
            Some("gpu-node-038")
        );
        assert_eq!(
            resolver.strip_suffix("gpu-node-038.VoltagePark.NET.").as_deref(),
            Some("gpu-node-038")
        );
    }

    #[test]
    fn test_strip_leaves_other_domains() {
        let resolver = with_suffix("voltagepark.net");
        assert_eq!(
            resolver.strip_suffix("gpu-node-038.example.org").as_deref(),
            Some("gpu-node-038.example.org")
        );
        // Suffix must start at a label boundary
        assert_eq!(
            resolver.strip_suffix("notvoltagepark.net").as_deref(),
            Some("notvoltagepark.net")
        );
        assert_eq!(
            resolver.strip_suffix("voltagepark.net").as_deref(),
            Some("voltagepark.net")
        );
    }

    #[test]
    fn test_strip_without_suffix_configured() {
        let resolver = with_suffix("");
        assert_eq!(
            resolver.strip_suffix("gpu-node-038.voltagepark.net.").as_deref(),
            Some("gpu-node-038.voltagepark.net")
        );
        assert_eq!(resolver.strip_suffix("."), None);
    }

    #[tokio::test]
    async fn test_disabled_resolver_returns_address() {
        let resolver = HostnameResolver::disabled();
        assert!(!resolver.is_enabled());
        assert_eq!(resolver.resolve("10.4.11.38").await, "10.4.11.38");
    }

    #[tokio::test]
    async fn test_http_timeout_falls_back() {
        use std::time::Duration;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dns-lookup"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "hostname": "gpu-node-038"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let endpoint = url::Url::parse(&format!("{}/api/dns-lookup", server.uri())).unwrap();
        let resolver = HostnameResolver::http(client, endpoint);
        assert_eq!(resolver.resolve("10.4.11.38").await, "10.4.11.38");
    }

    #[tokio::test]
    async fn test_dns_invalid_address_falls_back() {
        let resolver = HostnameResolver::dns(crate::initialization::init_resolver(1));
        assert_eq!(resolver.resolve("not-an-ip").await, "not-an-ip");
    }
}
