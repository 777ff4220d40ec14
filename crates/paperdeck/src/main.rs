//! Paperdeck backend - entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paperdeck::{config::Config, server::AppServer};

#[derive(Parser, Debug)]
#[command(name = "paperdeck")]
#[command(about = "Backend service for thesis-driven research paper collections")]
#[command(version)]
struct Cli {
    /// HTTP server port
    #[arg(long, default_value = "8080", env = "PORT")]
    port: u16,

    /// Base URL of the document-analysis backend
    #[arg(long, env = "ANALYSIS_API_URL")]
    analysis_url: Option<String>,

    /// URL of the literature-search API
    #[arg(long, env = "SEARCH_API_URL")]
    search_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = Config::new(cli.analysis_url, cli.search_url);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cli.port,
        analysis_url = %config.analysis_base_url,
        search_url = %config.search_api_url,
        "Starting paperdeck backend"
    );

    AppServer::new(&config)?.run(cli.port).await
}
