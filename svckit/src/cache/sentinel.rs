use std::time::{Duration, Instant};
use async_trait::async_trait;
use redis::sentinel::{SentinelClient, SentinelServerType};
use redis::FromRedisValue;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::SentinelConfig;
use crate::errors::CacheError;
use crate::metrics;

/// String key-value operations with expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Write `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Read `key`. A missing or expired key is [`CacheError::NotFound`].
    async fn get(&self, key: &str) -> Result<String, CacheError>;
}

/// Redis master located through Sentinel.
///
/// Construction never touches the network. The sentinel client is built on
/// first use, and every operation asks the sentinels for the current master,
/// so a failover is picked up by the next call.
pub struct SentinelStore {
    config: SentinelConfig,
    client: Mutex<Option<SentinelClient>>,
}

impl SentinelStore {
    pub fn new(config: SentinelConfig) -> Self {
        info!(
            "Sentinel store for master {} via {:?}",
            config.master_name, config.sentinels
        );
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SentinelConfig {
        &self.config
    }

    fn build_client(&self) -> Result<SentinelClient, CacheError> {
        if self.config.sentinels.is_empty() {
            return Err(CacheError::Connection(
                "no sentinel addresses configured".to_string(),
            ));
        }

        SentinelClient::build(
            self.config.sentinel_urls(),
            self.config.master_name.clone(),
            None,
            SentinelServerType::Master,
        )
        .map_err(|e| CacheError::Connection(e.to_string()))
    }

    async fn query<T>(&self, cmd: &redis::Cmd) -> Result<T, CacheError>
    where
        T: FromRedisValue + Send,
    {
        let mut guard = self.client.lock().await;
        if guard.is_none() {
            *guard = Some(self.build_client()?);
        }
        let client = guard
            .as_mut()
            .ok_or_else(|| CacheError::Connection("sentinel client unavailable".to_string()))?;

        let mut conn = client.get_async_connection().await.map_err(|e| {
            debug!("Master {} lookup failed: {}", self.config.master_name, e);
            CacheError::from(e)
        })?;

        Ok(cmd.query_async(&mut conn).await?)
    }
}

#[async_trait]
impl KeyValueStore for SentinelStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        debug!("SET {} (ttl {:?})", key, ttl);
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("PX").arg(ttl.as_millis() as u64);

        let start = Instant::now();
        let result: Result<(), CacheError> = self.query(&cmd).await;
        metrics::record_operation("set", "redis", result.is_ok(), start.elapsed().as_secs_f64());
        result
    }

    async fn get(&self, key: &str) -> Result<String, CacheError> {
        debug!("GET {}", key);
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);

        let start = Instant::now();
        let result: Result<Option<String>, CacheError> = self.query(&cmd).await;
        metrics::record_operation("get", "redis", result.is_ok(), start.elapsed().as_secs_f64());
        result?.ok_or_else(|| CacheError::NotFound(key.to_string()))
    }
}
