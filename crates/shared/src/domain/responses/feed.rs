//! Wire shapes of the three polled feeds.
//!
//! The feeds grew independently and do not agree on field names
//! (`isRead`/`createdAt`, `read`/`timestamp`, `assignedAt`). Each keeps
//! its own shape here; consumers apply their own unread rule per feed.

use crate::model::{ActivityLog, CourseAssignment, Notification};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub title: String,
    pub message: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        NotificationResponse {
            id: value.id,
            title: value.title,
            message: value.message,
            is_read: value.is_read,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogResponse {
    pub id: i32,
    pub action: String,
    pub description: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(value: ActivityLog) -> Self {
        ActivityLogResponse {
            id: value.id,
            action: value.action,
            description: value.description,
            read: value.is_read,
            timestamp: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseAssignmentResponse {
    pub id: i32,
    pub course_id: i32,
    pub course_name: String,
    pub assigned_at: DateTime<Utc>,
}

impl From<CourseAssignment> for CourseAssignmentResponse {
    fn from(value: CourseAssignment) -> Self {
        CourseAssignmentResponse {
            id: value.id,
            course_id: value.course_id,
            course_name: value.course_name,
            assigned_at: value.assigned_at,
        }
    }
}
