use std::sync::Arc;
use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::policies::load_balancing::DefaultPolicy;
use scylla::policies::retry::FallthroughRetryPolicy;
use scylla::response::query_result::QueryResult;
use scylla::response::{PagingState, PagingStateResponse};
use scylla::serialize::row::SerializeRow;
use scylla::statement::unprepared::Statement;
use tracing::{info, error, debug};

use crate::config::ClusterConfig;
use crate::errors::ClusterError;
use super::retry::RetryPolicy;

/// An open session against a Scylla/Cassandra cluster.
///
/// Every statement issued through it runs under the configured consistency
/// and request timeout, and is retried with exponential backoff on
/// transient failures. The driver session is closed when this is dropped.
pub struct ClusterSession {
    session: Session,
    retry: RetryPolicy,
    config: ClusterConfig,
}

impl ClusterSession {
    /// Connect to the cluster. Fails when no seed host can be reached or the
    /// keyspace does not exist.
    pub async fn connect(config: &ClusterConfig) -> Result<Self, ClusterError> {
        info!("Connecting to ScyllaDB cluster: {:?}", config.hosts);

        if config.hosts.is_empty() {
            return Err(ClusterError::Config("at least one seed host is required".to_string()));
        }

        let mut session_builder = SessionBuilder::new()
            .known_nodes(config.contact_points())
            .connection_timeout(config.connection_timeout())
            .use_keyspace(&config.keyspace, false)
            .default_execution_profile_handle(Self::execution_profile(config).into_handle());

        // Add authentication if provided
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            session_builder = session_builder.user(username, password);
        }

        let session = session_builder.build().await.map_err(|e| {
            error!("Failed to connect to ScyllaDB: {}", e);
            ClusterError::Connection(e.to_string())
        })?;

        info!(
            "Connected to ScyllaDB keyspace {} (consistency {:?})",
            config.keyspace, config.consistency
        );

        Ok(Self {
            session,
            retry: RetryPolicy::from(&config.retry),
            config: config.clone(),
        })
    }

    /// Consistency, timeout and host selection shared by every statement.
    ///
    /// The driver's own retries are disabled; [`RetryPolicy`] owns them.
    pub fn execution_profile(config: &ClusterConfig) -> ExecutionProfile {
        let load_balancing = DefaultPolicy::builder().token_aware(true).build();

        ExecutionProfile::builder()
            .consistency(config.consistency.into())
            .request_timeout(Some(config.request_timeout()))
            .retry_policy(Arc::new(FallthroughRetryPolicy::new()))
            .load_balancing_policy(load_balancing)
            .build()
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Execute a statement with bound values, retrying transient failures.
    pub async fn execute<V>(&self, query: &str, values: &V) -> Result<QueryResult, ClusterError>
    where
        V: SerializeRow,
    {
        let session = &self.session;
        self.retry
            .execute(query, move || async move {
                session
                    .query_unpaged(query, values)
                    .await
                    .map_err(ClusterError::from)
            })
            .await
    }

    /// Fetch one page of `query`, starting at `paging_state`.
    pub async fn fetch_page(
        &self,
        query: &str,
        paging_state: PagingState,
    ) -> Result<(QueryResult, PagingStateResponse), ClusterError> {
        debug!("Fetching page of: {}", query);

        let session = &self.session;
        let statement = &self.paged_statement(query);
        let paging_state = &paging_state;
        self.retry
            .execute(query, move || async move {
                session
                    .query_single_page(statement.clone(), (), paging_state.clone())
                    .await
                    .map_err(ClusterError::from)
            })
            .await
    }

    /// A statement paged at the configured page size.
    pub fn paged_statement(&self, query: &str) -> Statement {
        let mut statement = Statement::new(query);
        statement.set_page_size(self.config.page_size.max(1));
        statement
    }
}

impl Drop for ClusterSession {
    fn drop(&mut self) {
        info!("Closing ScyllaDB session for keyspace {}", self.config.keyspace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scylla::statement::Consistency;
    use std::time::Duration;

    #[test]
    fn test_profile_applies_consistency_and_timeout() {
        let config = ClusterConfig::default();
        let profile = ClusterSession::execution_profile(&config);
        assert_eq!(profile.get_consistency(), Consistency::All);
        assert_eq!(profile.get_request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_profile_leaves_retries_to_backoff_policy() {
        let profile = ClusterSession::execution_profile(&ClusterConfig::default());
        let retry_policy = format!("{:?}", profile.get_retry_policy());
        assert!(retry_policy.contains("FallthroughRetryPolicy"), "{}", retry_policy);

        let load_balancing = format!("{:?}", profile.get_load_balancing_policy());
        assert!(load_balancing.contains("DefaultPolicy"), "{}", load_balancing);
    }

    #[tokio::test]
    async fn test_connect_requires_a_seed_host() {
        let config = ClusterConfig {
            hosts: vec![],
            ..Default::default()
        };
        let result = ClusterSession::connect(&config).await;
        assert!(matches!(result, Err(ClusterError::Config(_))));
    }

    #[tokio::test]
    async fn test_connect_fails_when_no_seed_host_is_reachable() {
        let config = ClusterConfig {
            hosts: vec!["127.0.0.1".to_string()],
            port: 1,
            connection_timeout_secs: 2,
            ..Default::default()
        };
        let result = ClusterSession::connect(&config).await;
        assert!(matches!(result, Err(ClusterError::Connection(_))));
    }

    #[tokio::test]
    #[ignore] // Requires running ScyllaDB cluster
    async fn test_session_uses_configured_retry() {
        let config = ClusterConfig {
            hosts: vec!["127.0.0.1".to_string()],
            keyspace: "system".to_string(),
            consistency: crate::types::ConsistencyLevel::One,
            ..Default::default()
        };
        let session = ClusterSession::connect(&config).await.unwrap();
        assert_eq!(session.retry_policy(), &RetryPolicy::from(&config.retry));
        assert!(session.execute("SELECT now() FROM system.local", &()).await.is_ok());
    }
}
