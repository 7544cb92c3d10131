use clap::Parser;

use pathway_common::telemetry::LogFormat;
use pathway_common::ServiceMode;
use pathway_service::state::DEFAULT_MAX_BODY_BYTES;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[arg(long, env = "PATHWAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// `real` echoes processed data; `mock` fabricates payloads.
    #[arg(long, env = "PATHWAY_MODE", value_enum, default_value_t = ServiceMode::Real)]
    pub mode: ServiceMode,

    #[arg(long, env = "PATHWAY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP base URL for exporting traces; the exporter appends `/v1/traces`.
    #[arg(long, env = "OTLP_URL")]
    pub otlp_url: Option<String>,

    #[arg(long, env = "OTLP_TOKEN")]
    pub otlp_token: Option<String>,

    #[arg(long, env = "PATHWAY_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}
