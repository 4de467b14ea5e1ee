use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nyan_review::config::Config;
use nyan_review::github::{GithubClient, PullRequestApi};
use nyan_review::webhook::{self, AppState};

/// nyan-review — webhook service that receives GitHub pull_request
/// events, scores the change, and posts a cat-themed review comment.
#[derive(Parser, Debug)]
#[command(name = "nyan-review", version, about)]
struct Cli {
    /// Path to the TOML config file (defaults to .nyan-review.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Socket address to listen on (overrides config)
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let token = config.github_token().ok_or(
        "GitHub token not configured. Set GITHUB_TOKEN or [github].token in .nyan-review.toml",
    )?;

    let webhook_secret = config.webhook_secret();
    if webhook_secret.is_none() {
        warn!("no webhook secret configured; all deliveries will be rejected");
    }

    let api: Arc<dyn PullRequestApi> =
        Arc::new(GithubClient::new(config.api_base_url(), token));
    let state = Arc::new(AppState {
        api,
        webhook_secret,
    });

    let addr = match cli.bind {
        Some(addr) => addr,
        None => config.bind_addr()?,
    };
    let app = webhook::router(state);

    info!(%addr, "nyan-review listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
