use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, info};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;
use crate::errors::{Result, SchoolAdminError};

declare_object_cache_plugin!("redis", RedisObjectCache);

const SCAN_BATCH: usize = 200;

/// Redis 缓存，所有键都带有配置的前缀
pub struct RedisObjectCache {
    conn: MultiplexedConnection,
    key_prefix: String,
    default_ttl: u64,
}

/// 转义 glob 特殊字符，保证 SCAN 只匹配本前缀
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 2);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('*');
    pattern
}

impl RedisObjectCache {
    pub async fn connect() -> Result<Self> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.as_str()).map_err(|e| {
            SchoolAdminError::cache_connection(format!(
                "Invalid Redis URL {}: {e}",
                redis_config.url
            ))
        })?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SchoolAdminError::cache_connection(format!("Redis connect failed: {e}")))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| SchoolAdminError::cache_connection(format!("Redis ping failed: {e}")))?;
        debug!("Redis responded to PING with {}", pong);

        info!(
            "RedisObjectCache connected, prefix: '{}', default ttl: {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            conn,
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl.max(1),
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(self.make_key(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => {
                debug!("Cache miss: {}", key);
                CacheResult::NotFound
            }
            Err(e) => {
                error!("Failed to read '{}' from Redis: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 { self.default_ttl } else { ttl };
        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.make_key(&key), value, ttl)
            .await
        {
            error!("Failed to write '{}' to Redis: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(self.make_key(key)).await {
            error!("Failed to remove '{}' from Redis: {}", key, e);
        }
    }

    /// 按前缀 SCAN 后分批删除，不影响其他前缀的数据
    async fn invalidate_all(&self) {
        let mut conn = self.conn.clone();
        let pattern = scan_pattern(&self.key_prefix);
        let mut cursor: u64 = 0;
        let mut removed = 0usize;

        loop {
            let scanned: redis::RedisResult<(u64, Vec<String>)> = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await;

            let (next, keys) = match scanned {
                Ok(page) => page,
                Err(e) => {
                    error!("Redis SCAN failed during invalidate_all: {}", e);
                    return;
                }
            };

            if !keys.is_empty() {
                removed += keys.len();
                if let Err(e) = conn.del::<_, ()>(keys).await {
                    error!("Redis DEL failed during invalidate_all: {}", e);
                    return;
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Invalidated {} Redis keys under '{}'", removed, self.key_prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pattern_escapes_glob() {
        assert_eq!(scan_pattern("schooladmin:"), "schooladmin:*");
        assert_eq!(scan_pattern("a*b?[c]"), "a\\*b\\?\\[c\\]*");
    }
}
