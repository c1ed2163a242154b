use std::ops::ControlFlow;
use std::time::Instant;
use async_trait::async_trait;
use scylla::response::query_result::QueryResult;
use scylla::response::PagingState;
use tracing::debug;

use crate::errors::ClusterError;
use crate::metrics;
use crate::types::MutantRecord;
use super::query_builder::QueryBuilder;
use super::session::ClusterSession;

/// Rows read by a full-table scan.
///
/// A scan that fails part-way keeps what it read before the failure and
/// records the failure in `interrupted`.
#[derive(Debug, Default)]
pub struct RowScan {
    pub rows: Vec<MutantRecord>,
    pub interrupted: Option<ClusterError>,
}

impl RowScan {
    pub fn contains(&self, record: &MutantRecord) -> bool {
        self.rows.iter().any(|row| row == record)
    }
}

/// Storage for `mutant_data` records.
#[async_trait]
pub trait MutantStore: Send + Sync {
    async fn select_all(&self) -> Result<RowScan, ClusterError>;
    async fn insert(&self, record: &MutantRecord) -> Result<(), ClusterError>;
    async fn delete(&self, first_name: &str, last_name: &str) -> Result<(), ClusterError>;
    /// `keyspace.table`, used to label log lines.
    fn qualified_name(&self) -> String;
}

/// `mutant_data` table reached through a [`ClusterSession`].
pub struct MutantCatalog<'a> {
    session: &'a ClusterSession,
    table: String,
}

impl<'a> MutantCatalog<'a> {
    pub fn new(session: &'a ClusterSession, table: impl Into<String>) -> Self {
        Self {
            session,
            table: table.into(),
        }
    }

    async fn scan(&self) -> Result<RowScan, ClusterError> {
        let query = QueryBuilder::build_select_query(&self.table, &MutantRecord::COLUMNS);
        let mut scan = RowScan::default();
        let mut paging_state = PagingState::start();
        let mut first_page = true;

        loop {
            let (result, paging_response) = match self.session.fetch_page(&query, paging_state).await {
                Ok(page) => page,
                Err(e) if first_page => return Err(e),
                Err(e) => {
                    scan.interrupted = Some(e);
                    break;
                }
            };
            first_page = false;

            if let Err(e) = decode_page(result, &mut scan.rows) {
                scan.interrupted = Some(e);
                break;
            }

            match paging_response.into_paging_control_flow() {
                ControlFlow::Break(()) => break,
                ControlFlow::Continue(next) => paging_state = next,
            }
        }

        debug!("Scanned {} rows from {}", scan.rows.len(), self.table);
        Ok(scan)
    }
}

/// Decode rows one at a time, stopping at the first row that fails.
fn decode_page(result: QueryResult, rows: &mut Vec<MutantRecord>) -> Result<(), ClusterError> {
    let rows_result = result
        .into_rows_result()
        .map_err(|e| ClusterError::Decode(e.to_string()))?;

    let typed_rows = rows_result
        .rows::<MutantRecord>()
        .map_err(|e| ClusterError::Decode(e.to_string()))?;

    for row in typed_rows {
        rows.push(row.map_err(|e| ClusterError::Decode(e.to_string()))?);
    }
    Ok(())
}

#[async_trait]
impl MutantStore for MutantCatalog<'_> {
    async fn select_all(&self) -> Result<RowScan, ClusterError> {
        let start = Instant::now();
        let result = self.scan().await;
        let success = matches!(&result, Ok(scan) if scan.interrupted.is_none());
        metrics::record_operation("select", "scylla", success, start.elapsed().as_secs_f64());
        result
    }

    async fn insert(&self, record: &MutantRecord) -> Result<(), ClusterError> {
        let query = QueryBuilder::build_insert_query(&self.table, &MutantRecord::COLUMNS);
        let start = Instant::now();
        let result = self.session.execute(&query, record).await;
        metrics::record_operation("insert", "scylla", result.is_ok(), start.elapsed().as_secs_f64());
        result.map(|_| ())
    }

    async fn delete(&self, first_name: &str, last_name: &str) -> Result<(), ClusterError> {
        let query = QueryBuilder::build_delete_query(&self.table, &MutantRecord::KEY_COLUMNS);
        let start = Instant::now();
        let result = self.session.execute(&query, &(first_name, last_name)).await;
        metrics::record_operation("delete", "scylla", result.is_ok(), start.elapsed().as_secs_f64());
        result.map(|_| ())
    }

    fn qualified_name(&self) -> String {
        format!("{}.{}", self.session.config().keyspace, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusterConfig;

    #[test]
    fn test_row_scan_contains() {
        let mut scan = RowScan::default();
        assert!(!scan.contains(&MutantRecord::default()));
        scan.rows.push(MutantRecord::default());
        assert!(scan.contains(&MutantRecord::default()));
    }

    #[tokio::test]
    #[ignore] // Requires running ScyllaDB cluster with catalog.mutant_data
    async fn test_insert_select_delete_roundtrip() {
        let config = ClusterConfig {
            hosts: vec!["127.0.0.1".to_string()],
            consistency: crate::types::ConsistencyLevel::One,
            ..Default::default()
        };
        let session = ClusterSession::connect(&config).await.unwrap();
        let catalog = MutantCatalog::new(&session, "mutant_data");
        let record = MutantRecord::default();

        catalog.insert(&record).await.unwrap();
        assert!(catalog.select_all().await.unwrap().contains(&record));

        catalog.delete(&record.first_name, &record.last_name).await.unwrap();
        assert!(!catalog.select_all().await.unwrap().contains(&record));
    }
}
