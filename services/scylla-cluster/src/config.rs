use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use svckit::config::{ClusterConfig, ObservabilityConfig};
use svckit::types::MutantRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScyllaClusterConfig {
    pub cluster: ClusterConfig,
    pub catalog: CatalogConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub table: String,
    /// Record inserted and then deleted by the demo.
    pub record: MutantRecord,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table: "mutant_data".to_string(),
            record: MutantRecord::default(),
        }
    }
}

/// Defaults, then the optional file at `path`, then `SCYLLA_CLUSTER__*`
/// environment variables (`__` between sections, lists comma separated).
pub fn load_config(path: Option<&str>) -> Result<ScyllaClusterConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&ScyllaClusterConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("SCYLLA_CLUSTER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cluster.hosts")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use svckit::types::ConsistencyLevel;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.cluster.hosts, vec!["scylla-node1", "scylla-node2", "scylla-node3"]);
        assert_eq!(config.cluster.keyspace, "catalog");
        assert_eq!(config.cluster.consistency, ConsistencyLevel::All);
        assert_eq!(config.cluster.retry.max_retries, 5);
        assert_eq!(config.catalog.table, "mutant_data");
        assert_eq!(config.catalog.record, MutantRecord::default());
        assert!(config.cluster.username.is_none());
    }

    #[test]
    fn test_file_overrides_cluster_policy() {
        let path = std::env::temp_dir().join(format!("scylla-cluster-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "cluster:\n  hosts: [h1, h2, h3]\n  consistency: quorum\n  retry:\n    max_retries: 2"
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.cluster.hosts, vec!["h1", "h2", "h3"]);
        assert_eq!(config.cluster.consistency, ConsistencyLevel::Quorum);
        assert_eq!(config.cluster.retry.max_retries, 2);
        assert_eq!(config.cluster.retry.min_delay_ms, 1_000);
        assert_eq!(config.cluster.keyspace, "catalog");
    }
}
