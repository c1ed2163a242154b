mod config;
mod demo;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use svckit::database::{ClusterSession, MutantCatalog};
use svckit::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "scylla-cluster")]
#[command(about = "Select, insert and delete catalog rows through a ScyllaDB session")]
struct Args {
    /// Optional YAML/TOML/JSON file overriding the built-in defaults
    #[arg(short, long, env = "SCYLLA_CLUSTER_CONFIG")]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config(args.config.as_deref())?;

    let dispatch = logging::init(&config.observability.log_level);
    let _guard = tracing::dispatcher::set_default(&dispatch);

    info!("Starting ScyllaDB cluster demo");

    let session = match ClusterSession::connect(&config.cluster).await {
        Ok(session) => session,
        Err(e) => {
            error!("unable to connect to scylla: {}", e);
            return Err(e.into());
        }
    };

    let catalog = MutantCatalog::new(&session, config.catalog.table.clone());
    demo::run(&catalog, &config.catalog.record).await;

    if config.observability.export_metrics {
        match metrics::render() {
            Ok(text) => info!("Operation metrics:\n{}", text),
            Err(e) => warn!("Failed to render metrics: {}", e),
        }
    }

    Ok(())
}
