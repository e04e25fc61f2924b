//! External GeoIP API provider.
//!
//! Queries an HTTP JSON API (ip-api.com shape) for IP geolocation.
//! Requests run on the blocking pool with a bounded timeout; any
//! failure yields `None`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use crate::{GeoInfo, GeoLookup};

/// HTTP request timeout.
const HTTP_TIMEOUT_SECS: u64 = 2;

/// GeoIP provider backed by an external HTTP API.
///
/// `api_url_template` uses `{ip}` as the placeholder, e.g.
/// `http://ip-api.com/json/{ip}?fields=status,countryCode,regionName,city`.
pub struct HttpGeoProvider {
    api_url_template: String,
    agent: Agent,
}

impl HttpGeoProvider {
    /// Creates a provider for the given URL template.
    pub fn new(api_url_template: impl Into<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into();

        Self {
            api_url_template: api_url_template.into(),
            agent,
        }
    }

    fn fetch_sync(agent: &Agent, url: &str) -> Option<GeoInfo> {
        let resp = match agent.get(url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("geo API request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("geo API response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        parse_geo_response(&json)
    }
}

/// Parses an ip-api.com style response body.
///
/// Tolerates the common field spellings; a `"status": "fail"` body
/// yields `None`.
fn parse_geo_response(json: &serde_json::Value) -> Option<GeoInfo> {
    if json["status"].as_str() == Some("fail") {
        trace!("geo API returned fail status");
        return None;
    }

    let country = json["countryCode"]
        .as_str()
        .or_else(|| json["country_code"].as_str())
        .or_else(|| json["country"].as_str())
        .map(String::from);

    let region = json["regionName"]
        .as_str()
        .or_else(|| json["region"].as_str())
        .map(String::from);

    let city = json["city"].as_str().map(String::from);

    if country.is_none() && region.is_none() && city.is_none() {
        return None;
    }

    Some(GeoInfo {
        country,
        region,
        city,
    })
}

#[async_trait]
impl GeoLookup for HttpGeoProvider {
    async fn locate(&self, ip: &str) -> Option<GeoInfo> {
        let url = self.api_url_template.replace("{ip}", ip);
        let agent = self.agent.clone();

        match tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url)).await {
            Ok(info) => info,
            Err(e) => {
                warn!("geo lookup task failed: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "external-api"
    }
}
