//! Remote HTTP shipper for log events.
//!
//! POSTs each event as JSON to a remote evaluation endpoint with an
//! `Authorization` header. Delivery is best-effort on the blocking
//! pool; failures are logged locally and swallowed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use typed_builder::TypedBuilder;
use ureq::Agent;

use crate::event::LogEvent;
use crate::sink::LogSink;

/// Configuration for the remote shipper.
///
/// Explicit and injected; there is no process-wide shipper state.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShipperConfig {
    /// Full URL of the remote log endpoint.
    #[builder(setter(into))]
    pub endpoint: String,
    /// Access token sent with every request.
    #[builder(setter(into))]
    pub token: String,
    /// Authorization scheme, e.g. `Bearer`.
    #[builder(default = String::from("Bearer"), setter(into))]
    pub token_type: String,
    /// Per-request timeout.
    #[builder(default = Duration::from_secs(5))]
    pub timeout: Duration,
}

/// Sink that ships events to a remote endpoint over HTTP.
pub struct RemoteShipper {
    config: ShipperConfig,
    agent: Agent,
}

impl RemoteShipper {
    /// Creates a shipper for the given configuration.
    pub fn new(config: ShipperConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        Self { config, agent }
    }

    fn ship_sync(agent: &Agent, config: &ShipperConfig, event: &LogEvent) -> Result<(), String> {
        let authorization = format!("{} {}", config.token_type, config.token);

        agent
            .post(&config.endpoint)
            .header("Authorization", &authorization)
            .send_json(event)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl LogSink for RemoteShipper {
    async fn emit(&self, event: LogEvent) {
        let agent = self.agent.clone();
        let config = self.config.clone();

        let result =
            tokio::task::spawn_blocking(move || Self::ship_sync(&agent, &config, &event)).await;

        match result {
            Ok(Ok(())) => trace!("log event shipped"),
            Ok(Err(e)) => warn!("failed to ship log event: {}", e),
            Err(e) => warn!("log shipping task failed: {}", e),
        }
    }
}
