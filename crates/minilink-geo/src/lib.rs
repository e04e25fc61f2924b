//! IP-geolocation collaborator.
//!
//! Lookups are best-effort: a provider returns `None` on any failure
//! and never errors, so the workflow can absorb missing data into
//! `"Unknown"` placeholders without special-casing.

pub mod external_api;

pub use external_api::HttpGeoProvider;

use async_trait::async_trait;
use minilink_core::Location;

/// Approximate geolocation data as reported by a provider.
///
/// Fields the provider could not determine stay `None`; conversion to
/// [`Location`] fills them with `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl From<GeoInfo> for Location {
    fn from(info: GeoInfo) -> Self {
        Location::from_parts(info.country, info.region, info.city)
    }
}

/// Geolocation lookup trait.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Looks up the approximate location of an IP address.
    ///
    /// Never errors; any failure yields `None`.
    async fn locate(&self, ip: &str) -> Option<GeoInfo>;

    /// Provider name, for logs.
    fn name(&self) -> &'static str;
}

/// Provider that never resolves anything.
///
/// The default wiring when no geolocation backend is configured.
pub struct DisabledGeo;

#[async_trait]
impl GeoLookup for DisabledGeo {
    async fn locate(&self, _ip: &str) -> Option<GeoInfo> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
