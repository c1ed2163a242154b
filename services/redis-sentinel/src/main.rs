mod config;
mod demo;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use svckit::cache::SentinelStore;
use svckit::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "redis-sentinel")]
#[command(about = "Write and read a key through a Sentinel-managed Redis master")]
struct Args {
    /// Optional YAML/TOML/JSON file overriding the built-in defaults
    #[arg(short, long, env = "REDIS_SENTINEL_CONFIG")]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config(args.config.as_deref())?;

    let dispatch = logging::init(&config.observability.log_level);
    let _guard = tracing::dispatcher::set_default(&dispatch);

    info!(
        "Starting Redis Sentinel demo for master {}",
        config.sentinel.master_name
    );

    // Redis follows the master through the sentinels if it fails over.
    let store = SentinelStore::new(config.sentinel.clone());
    demo::run(&store, &config.entry).await;

    if config.observability.export_metrics {
        match metrics::render() {
            Ok(text) => info!("Operation metrics:\n{}", text),
            Err(e) => warn!("Failed to render metrics: {}", e),
        }
    }

    Ok(())
}
