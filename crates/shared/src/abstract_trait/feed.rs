use crate::{
    domain::responses::{
        ActivityLogResponse, ApiResponse, CourseAssignmentResponse, NotificationResponse,
    },
    errors::{RepositoryError, ServiceError},
    model::{ActivityLog, CourseAssignment, Notification},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynNotificationRepository = Arc<dyn NotificationRepositoryTrait + Send + Sync>;
pub type DynActivityLogRepository = Arc<dyn ActivityLogRepositoryTrait + Send + Sync>;
pub type DynCourseAssignmentRepository = Arc<dyn CourseAssignmentRepositoryTrait + Send + Sync>;
pub type DynFeedService = Arc<dyn FeedServiceTrait + Send + Sync>;

#[async_trait]
pub trait NotificationRepositoryTrait {
    async fn find_by_user(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError>;
    async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, RepositoryError>;
}

#[async_trait]
pub trait ActivityLogRepositoryTrait {
    async fn find_recent(&self, limit: i64) -> Result<Vec<ActivityLog>, RepositoryError>;
}

#[async_trait]
pub trait CourseAssignmentRepositoryTrait {
    async fn find_by_supervisor(
        &self,
        supervisor_id: i32,
        limit: i64,
    ) -> Result<Vec<CourseAssignment>, RepositoryError>;
}

#[async_trait]
pub trait FeedServiceTrait {
    async fn notifications(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError>;
    async fn mark_notification_read(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn activity_logs(&self) -> Result<ApiResponse<Vec<ActivityLogResponse>>, ServiceError>;
    async fn course_assignments(
        &self,
        supervisor_id: i32,
    ) -> Result<ApiResponse<Vec<CourseAssignmentResponse>>, ServiceError>;
}
