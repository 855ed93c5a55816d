mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use base_wallet_stats::{
    address::address_validation_error,
    aggregator::StatsAggregator,
    api::{self, AppState},
    config::Config,
    share,
};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let aggregator =
        StatsAggregator::new(&config.sources).context("failed to set up data sources")?;

    match cli.command {
        Commands::Stats { address } => {
            if let Some(err) = address_validation_error(&address) {
                anyhow::bail!("invalid address {:?}: {}", address, err);
            }
            let stats = aggregator.wallet_stats(&address).await;
            let out = serde_json::json!({
                "address": address.trim(),
                "stats": stats,
                "shareUrl": share::share_url(&config.public_base_url, &stats),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            let state = AppState {
                aggregator: Arc::new(aggregator),
                public_base_url: config.public_base_url.clone(),
            };
            api::run_http_server(&bind, state).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
