//! ipinfo.io-style geolocation client.

use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use super::{GeoInfo, GeoResolver};

/// Hard ceiling on a single lookup so the click recorder can never stall
/// for long on a slow geolocation service.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Deserialize)]
struct IpinfoResponse {
    city: Option<String>,
    country: Option<String>,
}

/// HTTP client for an ipinfo.io-shaped lookup endpoint
/// (`GET {base_url}/{ip}/json` returning `{ "city": .., "country": .. }`).
///
/// The base URL is configurable so tests and self-hosted lookup services
/// can point elsewhere.
pub struct IpinfoClient {
    client: reqwest::Client,
    base_url: String,
}

impl IpinfoClient {
    /// Builds a client with a strict per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(LOOKUP_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, ip: &str) -> Option<GeoInfo> {
        let url = format!("{}/{}/json", self.base_url.trim_end_matches('/'), ip);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| tracing::debug!(ip, error = %e, "geo lookup network error"))
            .ok()?;

        let body: IpinfoResponse = resp
            .json()
            .await
            .map_err(|e| tracing::debug!(ip, error = %e, "geo lookup parse error"))
            .ok()?;

        let city = body.city.filter(|s| !s.is_empty())?;
        let country = body.country.filter(|s| !s.is_empty())?;

        Some(GeoInfo { city, country })
    }
}

#[async_trait]
impl GeoResolver for IpinfoClient {
    async fn resolve(&self, ip: &str) -> Option<GeoInfo> {
        // Addresses that can never be geolocated are skipped without a
        // network round trip.
        if is_private(ip) {
            return None;
        }

        self.fetch(ip).await
    }
}

/// Returns `true` for addresses that should never be sent to a public
/// geolocation API: loopback, link-local, private ranges, and IPv6
/// special addresses. Unparseable input is treated the same way.
fn is_private(ip_str: &str) -> bool {
    // Strip IPv6-mapped IPv4 prefix: "::ffff:1.2.3.4" -> "1.2.3.4"
    let ip_str = ip_str.strip_prefix("::ffff:").unwrap_or(ip_str);

    match IpAddr::from_str(ip_str) {
        Ok(IpAddr::V4(addr)) => {
            let octets = addr.octets();
            addr.is_loopback()
                || addr.is_link_local()
                || addr.is_unspecified()
                || addr.is_broadcast()
                || octets[0] == 10
                || (octets[0] == 172 && (16..=31).contains(&octets[1]))
                || (octets[0] == 192 && octets[1] == 168)
        }
        Ok(IpAddr::V6(addr)) => {
            addr.is_loopback()
                || addr.is_unspecified()
                // fe80::/10 link-local
                || (addr.segments()[0] & 0xffc0) == 0xfe80
                // fc00::/7 unique-local
                || (addr.segments()[0] & 0xfe00) == 0xfc00
        }
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_is_private() {
        assert!(is_private("127.0.0.1"));
        assert!(is_private("::1"));
    }

    #[test]
    fn test_rfc1918_ranges_are_private() {
        assert!(is_private("10.1.2.3"));
        assert!(is_private("172.16.0.1"));
        assert!(is_private("172.31.255.255"));
        assert!(is_private("192.168.1.1"));
    }

    #[test]
    fn test_public_addresses_are_not_private() {
        assert!(!is_private("8.8.8.8"));
        assert!(!is_private("203.0.113.7"));
        assert!(!is_private("2001:4860:4860::8888"));
    }

    #[test]
    fn test_mapped_ipv4_prefix_is_stripped() {
        assert!(is_private("::ffff:192.168.0.1"));
        assert!(!is_private("::ffff:8.8.8.8"));
    }

    #[test]
    fn test_garbage_is_treated_as_private() {
        assert!(is_private("not-an-ip"));
        assert!(is_private(""));
    }

    #[tokio::test]
    async fn test_resolve_skips_private_without_network() {
        // Points at an unroutable base URL; a private IP must short-circuit
        // before any request is attempted.
        let client = IpinfoClient::new("http://127.0.0.1:1").unwrap();
        assert!(client.resolve("192.168.0.10").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_degrades_on_network_failure() {
        let client = IpinfoClient::new("http://127.0.0.1:1").unwrap();
        assert!(client.resolve("203.0.113.7").await.is_none());
    }
}
