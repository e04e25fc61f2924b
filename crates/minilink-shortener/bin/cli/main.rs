mod cli;

use crate::cli::CLI;
use clap::Parser;
use minilink_core::SystemClock;
use minilink_generator::RandomCodeSource;
use minilink_geo::{DisabledGeo, GeoLookup, HttpGeoProvider};
use minilink_logging::{LogSink, RemoteShipper, ShipperConfig, TracingSink};
use minilink_shortener::{CreateParams, ServiceConfig, UrlService, UrlWorkflow};
use minilink_storage::InMemoryRepository;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CLI::try_parse()?;

    let geo: Arc<dyn GeoLookup> = match &args.geo_api_url {
        Some(url) => Arc::new(HttpGeoProvider::new(url.clone())),
        None => Arc::new(DisabledGeo),
    };

    let sink: Arc<dyn LogSink> = match &args.log_endpoint {
        Some(endpoint) => Arc::new(RemoteShipper::new(
            ShipperConfig::builder()
                .endpoint(endpoint.clone())
                .token(args.log_token.clone())
                .token_type(args.log_token_type.clone())
                .build(),
        )),
        None => Arc::new(TracingSink),
    };

    let service = UrlService::with_collaborators(
        ServiceConfig::builder().base_url(args.base_url.clone()).build(),
        Arc::new(InMemoryRepository::new()),
        RandomCodeSource::default(),
        geo,
        sink,
        Arc::new(SystemClock),
    );

    let created = service
        .create_short_url(CreateParams {
            url: args.url,
            validity_minutes: args.validity,
            custom_code: args.code,
        })
        .await?;

    info!(short_link = %created.short_link, expiry = %created.expiry, "short url created");

    let code = created
        .short_link
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_owned();

    for _ in 0..args.clicks {
        let target = service
            .resolve_and_record(&code, &args.client_ip, args.referrer.clone())
            .await?;
        debug!(%target, "recorded click");
    }

    let stats = service.statistics(&code).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
