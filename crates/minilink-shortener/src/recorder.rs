use jiff::Timestamp;
use minilink_core::{
    ClickEvent, Location, Repository, ServiceError, ServiceResult, ShortCode, StoreError,
    UrlRecord,
};
use minilink_geo::GeoLookup;
use std::sync::Arc;
use tracing::trace;

/// Builds click events and records them through the store's atomic
/// per-record primitive.
///
/// Geolocation is best-effort: lookup failures are absorbed into
/// `"Unknown"` placeholders and never surface. Expiration is not this
/// component's business; the workflow decides whether to record.
pub struct ClickRecorder<R> {
    repository: Arc<R>,
    geo: Arc<dyn GeoLookup>,
}

impl<R: Repository> ClickRecorder<R> {
    /// Creates a recorder over the given store and geo collaborator.
    pub fn new(repository: Arc<R>, geo: Arc<dyn GeoLookup>) -> Self {
        Self { repository, geo }
    }

    /// Records one access of `code`, returning the updated record.
    pub async fn record(
        &self,
        code: &ShortCode,
        client_ip: &str,
        referrer: Option<String>,
        now: Timestamp,
    ) -> ServiceResult<UrlRecord> {
        let location = match self.geo.locate(client_ip).await {
            Some(info) => Location::from(info),
            None => Location::default(),
        };
        trace!(code = %code, provider = self.geo.name(), ?location, "resolved click location");

        let event = ClickEvent::new(now, client_ip, referrer, location);

        self.repository
            .record_click(code, event)
            .await
            .map_err(|e| match e {
                StoreError::Missing(code) => ServiceError::NotFound(code),
                other => other.into(),
            })
    }
}
