use crate::{
    abstract_trait::NotificationRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Notification,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct NotificationRepository {
    db: ConnectionPool,
}

impl NotificationRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, title, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch notifications for user {user_id}: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, message, is_read, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)
    }
}
