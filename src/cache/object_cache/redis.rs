use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_cache_backend;
use crate::errors::{AskSystemError, Result};

declare_cache_backend!("redis", RedisObjectCache);

/// Redis 缓存后端，多实例部署时共享登录主体缓存
pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // 秒
}

impl RedisObjectCache {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| AskSystemError::cache_connection(format!("Redis URL 无效: {e}")))?;

        // 启动时做一次 PING，失败则让上层回退到内存缓存
        let mut conn = client.get_connection().map_err(|e| {
            AskSystemError::cache_connection(format!(
                "Redis 连接失败 ({}): {e}",
                redis_config.url
            ))
        })?;
        let response: String = redis::cmd("PING").query(&mut conn).map_err(|e| {
            AskSystemError::cache_connection(format!(
                "Redis PING 失败 ({}): {e}",
                redis_config.url
            ))
        })?;
        debug!(
            "Redis connection test successful: {} (prefix: '{}', ttl: {}s)",
            response, redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(
        &self,
    ) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        match conn.get::<_, Option<String>>(redis_key).await {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let redis_key = self.make_key(&key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        // ttl 为 0 时使用配置的默认 TTL
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };

        if let Err(e) = conn
            .set_ex::<String, String, ()>(redis_key, value, effective_ttl)
            .await
        {
            error!("Failed to insert key '{}' into cache: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<String, i64>(redis_key).await {
            error!("Failed to remove key '{}': {}", key, e);
        }
    }

    // 按前缀 SCAN 后批量删除，避免 FLUSHDB 波及同库的其他键
    async fn invalidate_all(&self) {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        let pattern = format!("{}*", self.key_prefix);
        let mut cursor: u64 = 0;
        loop {
            let reply: std::result::Result<(u64, Vec<String>), _> = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut conn)
                .await;

            let (next, keys) = match reply {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Failed to scan cache keys: {}", e);
                    return;
                }
            };

            if !keys.is_empty()
                && let Err(e) = conn.del::<_, i64>(keys).await
            {
                error!("Failed to delete cache keys: {}", e);
                return;
            }

            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        debug!("Cleared all cache keys with prefix '{}'", self.key_prefix);
    }
}
