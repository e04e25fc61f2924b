use crate::record::{ClickEvent, Location, UrlRecord};
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::Serialize;

/// One click as exposed in a statistics view.
///
/// The client IP is deliberately not projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickView {
    pub timestamp: Timestamp,
    pub referrer: String,
    pub location: Location,
}

impl From<&ClickEvent> for ClickView {
    fn from(event: &ClickEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            referrer: event.referrer.clone(),
            location: event.location.clone(),
        }
    }
}

/// Read-only statistics summary of a URL record.
///
/// `is_expired` is computed at projection time, never read from a
/// stored flag. Timestamps serialize as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlStats {
    pub shortcode: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub total_clicks: u64,
    pub is_expired: bool,
    pub validity_minutes: i64,
    pub clicks: Vec<ClickView>,
}

impl UrlStats {
    /// Projects a record into its statistics view, evaluating
    /// expiration at `now`.
    pub fn project(record: &UrlRecord, now: Timestamp) -> Self {
        Self {
            shortcode: record.short_code.clone(),
            original_url: record.original_url.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
            total_clicks: record.total_clicks,
            is_expired: record.is_expired_at(now),
            validity_minutes: record.validity_minutes,
            clicks: record.clicks.iter().map(ClickView::from).collect(),
        }
    }
}
