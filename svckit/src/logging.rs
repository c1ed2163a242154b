use tracing::{Dispatch, Level};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Parse a level name, falling back to `info` when it is not recognised.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Build the console subscriber for a binary.
///
/// `RUST_LOG` wins over `level` when set. The returned dispatcher is meant to
/// be installed with [`tracing::dispatcher::set_default`] for the lifetime of
/// `main`; nothing is registered globally.
pub fn init(level: &str) -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(level).to_string()));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false),
        );

    Dispatch::new(subscriber)
}
