use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub description: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
