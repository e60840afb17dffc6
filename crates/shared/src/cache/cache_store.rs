use crate::abstract_trait::LoginThrottleTrait;
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<Pool>,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }

    pub async fn delete_from_cache(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Failed to delete key '{key}': {:?}", e);
        }
    }
}

#[async_trait]
impl LoginThrottleTrait for CacheStore {
    async fn record_attempt(&self, key: &str, window: Duration) -> u32 {
        let Some(mut conn) = self.get_conn().await else {
            return 0;
        };

        let result: redis::RedisResult<(u32,)> = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(window.num_seconds())
            .ignore()
            .query_async(&mut conn)
            .await;

        match result {
            Ok((count,)) => count,
            Err(e) => {
                warn!("Failed to record login attempt for '{key}': {:?}", e);
                0
            }
        }
    }

    async fn reset(&self, key: &str) {
        self.delete_from_cache(key).await;
    }
}
