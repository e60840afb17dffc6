use crate::domain::session::Session;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;
pub type DynLoginThrottle = Arc<dyn LoginThrottleTrait + Send + Sync>;

/// Server-side session storage. Failures are logged by the implementation
/// and reported as `false` / `None`; a missing session reads as logged out.
#[async_trait]
pub trait SessionStoreTrait {
    async fn create_session(&self, session_id: &str, session: &Session, ttl: Duration) -> bool;
    async fn get_session(&self, session_id: &str) -> Option<Session>;
    async fn delete_session(&self, session_id: &str) -> bool;
    async fn refresh_session(&self, session_id: &str, ttl: Duration) -> bool;
}

/// Login attempt bookkeeping keyed by username. `record_attempt` returns the
/// count including the attempt just recorded.
#[async_trait]
pub trait LoginThrottleTrait {
    async fn record_attempt(&self, key: &str, window: Duration) -> u32;
    async fn reset(&self, key: &str);
}
