use clap::Parser;

pub const BASE_URL_ENV: &str = "MINILINK_BASE_URL";
pub const GEO_API_URL_ENV: &str = "MINILINK_GEO_API_URL";
pub const LOG_ENDPOINT_ENV: &str = "MINILINK_LOG_ENDPOINT";
pub const LOG_TOKEN_ENV: &str = "MINILINK_LOG_TOKEN";
pub const LOG_TOKEN_TYPE_ENV: &str = "MINILINK_LOG_TOKEN_TYPE";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Parser)]
#[command(
    name = "minilink",
    about = "Shorten a URL, simulate clicks against it, and print its statistics"
)]
pub struct CLI {
    /// URL to shorten.
    #[arg(long)]
    pub url: String,

    /// Custom short code; generated when omitted.
    #[arg(long)]
    pub code: Option<String>,

    /// Validity window in minutes; service default when omitted.
    #[arg(long)]
    pub validity: Option<i64>,

    /// Number of simulated clicks to record.
    #[arg(long, default_value_t = 3)]
    pub clicks: u32,

    /// Client IP attributed to the simulated clicks.
    #[arg(long, default_value = "127.0.0.1")]
    pub client_ip: String,

    /// Referrer attributed to the simulated clicks.
    #[arg(long)]
    pub referrer: Option<String>,

    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// GeoIP API URL template with an `{ip}` placeholder.
    #[arg(long, env = GEO_API_URL_ENV)]
    pub geo_api_url: Option<String>,

    /// Remote log endpoint; events are shipped there when set,
    /// otherwise they land on the local tracing pipeline.
    #[arg(long, env = LOG_ENDPOINT_ENV)]
    pub log_endpoint: Option<String>,

    /// Access token for the remote log endpoint.
    #[arg(long, env = LOG_TOKEN_ENV, default_value = "")]
    pub log_token: String,

    /// Authorization scheme for the remote log endpoint.
    #[arg(long, env = LOG_TOKEN_TYPE_ENV, default_value = "Bearer")]
    pub log_token_type: String,
}
