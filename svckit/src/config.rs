use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::ConsistencyLevel;

/// Connection settings for a Scylla/Cassandra cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Seed hosts, without port.
    pub hosts: Vec<String>,
    pub port: u16,
    pub keyspace: String,
    pub consistency: ConsistencyLevel,
    pub request_timeout_secs: u64,
    pub connection_timeout_secs: u64,
    /// Rows fetched per page when scanning a table.
    pub page_size: i32,
    pub username: Option<String>,
    pub password: Option<String>,
    pub retry: RetryConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            hosts: vec![
                "scylla-node1".to_string(),
                "scylla-node2".to_string(),
                "scylla-node3".to_string(),
            ],
            port: 9042,
            keyspace: "catalog".to_string(),
            consistency: ConsistencyLevel::All,
            request_timeout_secs: 5,
            connection_timeout_secs: 5,
            page_size: 5000,
            username: None,
            password: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ClusterConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// `host:port` pairs handed to the driver as known nodes.
    pub fn contact_points(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|h| format!("{}:{}", h, self.port))
            .collect()
    }
}

/// Exponential backoff applied to transient statement failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1_000,
            max_delay_ms: 10_000,
            max_retries: 5,
        }
    }
}

/// Where to find the sentinels and which master they track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    pub master_name: String,
    /// Sentinel endpoints as `host:port`.
    pub sentinels: Vec<String>,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            master_name: "mymaster".to_string(),
            sentinels: vec![
                "redis-sentinel1:26379".to_string(),
                "redis-sentinel2:26380".to_string(),
                "redis-sentinel3:26381".to_string(),
            ],
        }
    }
}

impl SentinelConfig {
    pub fn sentinel_urls(&self) -> Vec<String> {
        self.sentinels
            .iter()
            .map(|addr| format!("redis://{}", addr))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// Log the collected operation metrics when the binary finishes.
    pub export_metrics: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            export_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_defaults() {
        let config = ClusterConfig::default();
        assert_eq!(config.keyspace, "catalog");
        assert_eq!(config.consistency, ConsistencyLevel::All);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.retry,
            RetryConfig {
                min_delay_ms: 1_000,
                max_delay_ms: 10_000,
                max_retries: 5,
            }
        );
    }

    #[test]
    fn test_contact_points_carry_port() {
        let config = ClusterConfig {
            hosts: vec!["h1".to_string(), "h2".to_string()],
            port: 19042,
            ..Default::default()
        };
        assert_eq!(config.contact_points(), vec!["h1:19042", "h2:19042"]);
    }

    #[test]
    fn test_sentinel_urls() {
        let config = SentinelConfig::default();
        assert_eq!(config.master_name, "mymaster");
        assert_eq!(
            config.sentinel_urls(),
            vec![
                "redis://redis-sentinel1:26379",
                "redis://redis-sentinel2:26380",
                "redis://redis-sentinel3:26381",
            ]
        );
    }

    #[test]
    fn test_metrics_export_is_opt_in() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.export_metrics);
    }
}
