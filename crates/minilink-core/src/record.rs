use crate::error::ServiceError;
use crate::expiry;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Referrer recorded when the client supplies none.
pub const DIRECT_REFERRER: &str = "direct";

/// Placeholder used when geolocation yields no data.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Approximate geolocation of a click, with `"Unknown"` placeholders
/// for anything the lookup could not determine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub city: String,
}

impl Location {
    /// Builds a location, substituting `"Unknown"` for missing fields.
    pub fn from_parts(
        country: Option<String>,
        region: Option<String>,
        city: Option<String>,
    ) -> Self {
        let or_unknown = |part: Option<String>| part.unwrap_or_else(|| UNKNOWN_PLACE.to_owned());
        Self {
            country: or_unknown(country),
            region: or_unknown(region),
            city: or_unknown(city),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_parts(None, None, None)
    }
}

/// One recorded access of a short code.
///
/// Owned exclusively by its parent [`UrlRecord`]; never referenced
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub timestamp: Timestamp,
    pub referrer: String,
    pub ip_address: String,
    pub location: Location,
}

impl ClickEvent {
    /// Builds a click event, defaulting the referrer to `"direct"`.
    pub fn new(
        timestamp: Timestamp,
        ip_address: impl Into<String>,
        referrer: Option<String>,
        location: Location,
    ) -> Self {
        Self {
            timestamp,
            referrer: referrer.unwrap_or_else(|| DIRECT_REFERRER.to_owned()),
            ip_address: ip_address.into(),
            location,
        }
    }
}

/// A stored URL record.
///
/// `total_clicks` always equals `clicks.len()`; both are only ever
/// advanced together through [`UrlRecord::push_click`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub short_code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub validity_minutes: i64,
    pub clicks: Vec<ClickEvent>,
    pub total_clicks: u64,
    /// Reserved flag; defaults to `true` and is read by no policy.
    pub is_active: bool,
}

impl UrlRecord {
    /// Creates a fresh record with an empty click history.
    ///
    /// Computes `expires_at` from the validity window; a non-positive
    /// window is rejected with [`ServiceError::InvalidValidity`].
    pub fn new(
        short_code: ShortCode,
        original_url: impl Into<String>,
        created_at: Timestamp,
        validity_minutes: i64,
    ) -> Result<Self, ServiceError> {
        let expires_at = expiry::compute_expiry(created_at, validity_minutes)?;
        Ok(Self {
            short_code,
            original_url: original_url.into(),
            created_at,
            expires_at,
            validity_minutes,
            clicks: Vec::new(),
            total_clicks: 0,
            is_active: true,
        })
    }

    /// Whether this record is expired at the given instant.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        expiry::is_expired(self.expires_at, now)
    }

    /// Appends a click and advances the counter in lockstep.
    pub fn push_click(&mut self, event: ClickEvent) {
        self.clicks.push(event);
        self.total_clicks += 1;
    }
}

/// Validates that a URL is absolute with an `http` or `https` scheme.
pub fn validate_original_url(url: &str) -> Result<(), ServiceError> {
    if url.is_empty() {
        return Err(ServiceError::InvalidUrl("URL cannot be empty".to_owned()));
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(ServiceError::InvalidUrl(format!(
            "URL must have a scheme and host: {}",
            url
        )));
    };

    if rest.is_empty() {
        return Err(ServiceError::InvalidUrl(format!(
            "URL must have a host: {}",
            url
        )));
    }

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ServiceError::InvalidUrl(format!(
            "URL scheme must be http or https: {}",
            scheme
        )));
    }

    Ok(())
}
