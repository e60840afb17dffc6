use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseAssignment {
    pub id: i32,
    pub supervisor_id: i32,
    pub course_id: i32,
    pub course_name: String,
    pub assigned_at: DateTime<Utc>,
}
