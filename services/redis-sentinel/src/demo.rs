use tracing::{error, info, warn};

use svckit::cache::KeyValueStore;
use svckit::errors::CacheError;
use svckit::types::KeyValueEntry;

/// What the write/read pair observed.
#[derive(Debug, Default, PartialEq)]
pub struct SessionReport {
    pub stored: bool,
    pub fetched: Option<String>,
}

/// Write `entry` with its expiry, then read it back. Failures are logged and
/// never stop the sequence.
pub async fn run(store: &dyn KeyValueStore, entry: &KeyValueEntry) -> SessionReport {
    let mut report = SessionReport::default();

    match store.set(&entry.key, &entry.value, entry.ttl()).await {
        Ok(()) => {
            info!("Set {} (expires in {}s)", entry.key, entry.ttl_secs);
            report.stored = true;
        }
        Err(e) => error!("Error setting key: {}", e),
    }

    match store.get(&entry.key).await {
        Ok(value) => {
            info!("{}: {}", entry.key, value);
            report.fetched = Some(value);
        }
        Err(CacheError::NotFound(key)) => warn!("Key {} not found", key),
        Err(e) => error!("Error getting key: {}", e),
    }

    report
}
