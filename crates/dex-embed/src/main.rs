//! Embed server CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use dex_embed::api::{MangaDexClient, RateBudget};
use dex_embed::embed::EmbedResolver;
use dex_embed::server::{self, AppState};
use shared::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.logging.log_dir.clone(),
        component: "dex-embed".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Embed server starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    // Initialize API client
    let budget = RateBudget {
        refill_interval: config.mangadex.rate_limit.refill_interval(),
        burst: config.mangadex.rate_limit.burst,
    };
    info!(
        refill_interval_ms = config.mangadex.rate_limit.refill_interval_ms,
        burst = budget.burst,
        "Using MangaDex rate budget"
    );

    let client = Arc::new(
        MangaDexClient::new(
            config.mangadex.api_base_url.clone(),
            budget,
            config.mangadex.request_timeout(),
        )
        .context("Failed to create MangaDex client")?,
    );

    // Initialize resolver
    let resolver = EmbedResolver::new(
        client,
        config.mangadex.site_base_url.clone(),
        config.mangadex.covers_base_url.clone(),
    );

    // Run the server
    server::run(
        AppState { resolver },
        &config.server.bind_address,
        config.server.port,
    )
    .await
}
