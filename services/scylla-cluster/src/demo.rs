use tracing::{error, info, warn};

use svckit::database::MutantStore;
use svckit::types::MutantRecord;

/// Select, insert `record`, select, delete it, select. Every failure is
/// logged and the sequence carries on. Returns the rows each select saw.
pub async fn run(store: &dyn MutantStore, record: &MutantRecord) -> Vec<Vec<MutantRecord>> {
    let mut snapshots = Vec::with_capacity(3);

    snapshots.push(display_results(store).await);

    info!("Inserting {}", record.first_name);
    if let Err(e) = store.insert(record).await {
        error!("insert {}: {}", store.qualified_name(), e);
    }

    snapshots.push(display_results(store).await);

    info!("Deleting {}", record.first_name);
    if let Err(e) = store.delete(&record.first_name, &record.last_name).await {
        error!("delete {}: {}", store.qualified_name(), e);
    }

    snapshots.push(display_results(store).await);
    snapshots
}

async fn display_results(store: &dyn MutantStore) -> Vec<MutantRecord> {
    info!("Displaying Results:");

    match store.select_all().await {
        Ok(scan) => {
            for row in &scan.rows {
                info!("\t{}", row);
            }
            if let Some(e) = scan.interrupted {
                warn!("select {}: {}", store.qualified_name(), e);
            }
            scan.rows
        }
        Err(e) => {
            warn!("select {}: {}", store.qualified_name(), e);
            Vec::new()
        }
    }
}
