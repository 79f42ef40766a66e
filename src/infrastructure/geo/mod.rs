//! IP geolocation lookup.

mod ipinfo;

pub use ipinfo::IpinfoClient;

use async_trait::async_trait;

/// Geolocation data for a single IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoInfo {
    pub city: String,
    pub country: String,
}

/// Resolves an IP address to an approximate location.
///
/// Implementations are best-effort: any failure (network, parse, missing
/// fields, private address) is reported as `None` and the caller degrades
/// to "unknown" labels. A resolver must never block the redirect path; it
/// is only called from the background click recorder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve(&self, ip: &str) -> Option<GeoInfo>;
}
