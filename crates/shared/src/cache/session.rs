use crate::{abstract_trait::SessionStoreTrait, domain::session::Session};
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Redis-backed sessions stored as JSON under `session:{user_id}` with a
/// sliding TTL.
#[derive(Clone)]
pub struct SessionStore {
    pool: Arc<Pool>,
}

impl SessionStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Session store has no redis connection: {:?}", e);
                None
            }
        }
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn create_session(&self, session_id: &str, session: &Session, ttl: Duration) -> bool {
        let json_data = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize session for {}: {:?}", session.username, e);
                return false;
            }
        };

        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let result: Result<(), _> = conn
            .set_ex(session_id, &json_data, ttl.num_seconds() as u64)
            .await;

        match result {
            Ok(_) => {
                debug!("Session {session_id} stored for {}s", ttl.num_seconds());
                true
            }
            Err(e) => {
                error!("Failed to store session {session_id}: {:?}", e);
                false
            }
        }
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        let mut conn = self.get_conn().await?;
        let raw: Option<String> = match conn.get(session_id).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Redis get error for session {session_id}: {:?}", e);
                return None;
            }
        };

        let Some(raw) = raw else {
            debug!("No live session under {session_id}");
            return None;
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                // An unreadable record can never authenticate anyone; drop it.
                warn!("Discarding unreadable session {session_id}: {e}");
                let _: Result<i64, _> = conn.del(session_id).await;
                None
            }
        }
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let result: Result<i64, _> = conn.del(session_id).await;
        match result {
            Ok(removed) => {
                debug!("Session {session_id} deleted ({removed} key)");
                removed > 0
            }
            Err(e) => {
                error!("Failed to delete session {session_id}: {:?}", e);
                false
            }
        }
    }

    async fn refresh_session(&self, session_id: &str, ttl: Duration) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let result: Result<bool, _> = conn.expire(session_id, ttl.num_seconds()).await;
        match result {
            Ok(found) => found,
            Err(e) => {
                error!("Failed to extend session {session_id}: {:?}", e);
                false
            }
        }
    }
}
