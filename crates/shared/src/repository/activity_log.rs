use crate::{
    abstract_trait::ActivityLogRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::ActivityLog,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct ActivityLogRepository {
    db: ConnectionPool,
}

impl ActivityLogRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityLogRepositoryTrait for ActivityLogRepository {
    async fn find_recent(&self, limit: i64) -> Result<Vec<ActivityLog>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT id, user_id, action, description, is_read, created_at
            FROM activity_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch activity logs: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
