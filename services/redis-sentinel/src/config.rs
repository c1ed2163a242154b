use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use svckit::config::{ObservabilityConfig, SentinelConfig};
use svckit::types::KeyValueEntry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisSentinelConfig {
    pub sentinel: SentinelConfig,
    /// Key written and read back by the demo.
    pub entry: KeyValueEntry,
    pub observability: ObservabilityConfig,
}

/// Defaults, then the optional file at `path`, then `REDIS_SENTINEL__*`
/// environment variables (`__` between sections, lists comma separated).
pub fn load_config(path: Option<&str>) -> Result<RedisSentinelConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&RedisSentinelConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("REDIS_SENTINEL")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("sentinel.sentinels")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.sentinel.master_name, "mymaster");
        assert_eq!(config.sentinel.sentinels.len(), 3);
        assert_eq!(config.entry.key, "key");
        assert_eq!(config.entry.value, "value111");
        assert_eq!(config.entry.ttl_secs, 500);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("redis-sentinel-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "sentinel:\n  master_name: othermaster\n  sentinels:\n    - \"10.0.0.1:26379\"\nentry:\n  ttl_secs: 60"
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.sentinel.master_name, "othermaster");
        assert_eq!(config.sentinel.sentinels, vec!["10.0.0.1:26379"]);
        assert_eq!(config.entry.ttl_secs, 60);
        assert_eq!(config.entry.key, "key");
    }
}
