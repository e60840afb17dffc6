use crate::{
    abstract_trait::{
        DynActivityLogRepository, DynCourseAssignmentRepository, DynNotificationRepository,
        FeedServiceTrait,
    },
    domain::responses::{
        ActivityLogResponse, ApiResponse, CourseAssignmentResponse, NotificationResponse,
    },
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const FEED_LIMIT: i64 = 50;

pub struct FeedService {
    notifications: DynNotificationRepository,
    activity_logs: DynActivityLogRepository,
    assignments: DynCourseAssignmentRepository,
    tracer: ServiceTracer,
}

pub struct FeedServiceDeps {
    pub notifications: DynNotificationRepository,
    pub activity_logs: DynActivityLogRepository,
    pub assignments: DynCourseAssignmentRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl FeedService {
    pub async fn new(deps: FeedServiceDeps) -> Self {
        let FeedServiceDeps {
            notifications,
            activity_logs,
            assignments,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("feed_service", &mut *registry.lock().await);

        Self {
            notifications,
            activity_logs,
            assignments,
            tracer: ServiceTracer::new("feed-service", Arc::new(Mutex::new(metrics))),
        }
    }
}

#[async_trait]
impl FeedServiceTrait for FeedService {
    async fn notifications(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "ListNotifications",
            vec![
                KeyValue::new("component", "feed"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.notifications.find_by_user(user_id, FEED_LIMIT).await {
            Ok(rows) => {
                let data: Vec<NotificationResponse> =
                    rows.into_iter().map(NotificationResponse::from).collect();

                info!("🔔 Fetched {} notifications for user {user_id}", data.len());
                self.tracer
                    .complete_success(&tracing_ctx, method, "Notifications fetched")
                    .await;

                Ok(ApiResponse::success("Notifications fetched successfully", data))
            }
            Err(e) => {
                error!("❌ Failed to fetch notifications for user {user_id}: {e}");
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch notifications")
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn mark_notification_read(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        let method = Method::Patch;
        let tracing_ctx = self.tracer.start(
            "MarkNotificationRead",
            vec![
                KeyValue::new("component", "feed"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("notification.id", id.to_string()),
            ],
        );

        match self.notifications.mark_read(user_id, id).await {
            Ok(row) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Notification marked as read")
                    .await;
                Ok(ApiResponse::success(
                    "Notification marked as read",
                    NotificationResponse::from(row),
                ))
            }
            Err(e) => {
                error!("❌ Failed to mark notification {id} as read: {e}");
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to mark notification")
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn activity_logs(&self) -> Result<ApiResponse<Vec<ActivityLogResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start("ListActivityLogs", vec![KeyValue::new("component", "feed")]);

        match self.activity_logs.find_recent(FEED_LIMIT).await {
            Ok(rows) => {
                let data = rows.into_iter().map(ActivityLogResponse::from).collect();
                self.tracer
                    .complete_success(&tracing_ctx, method, "Activity logs fetched")
                    .await;
                Ok(ApiResponse::success("Activity logs fetched successfully", data))
            }
            Err(e) => {
                error!("❌ Failed to fetch activity logs: {e}");
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch activity logs")
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn course_assignments(
        &self,
        supervisor_id: i32,
    ) -> Result<ApiResponse<Vec<CourseAssignmentResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "ListCourseAssignments",
            vec![
                KeyValue::new("component", "feed"),
                KeyValue::new("supervisor.id", supervisor_id.to_string()),
            ],
        );

        match self
            .assignments
            .find_by_supervisor(supervisor_id, FEED_LIMIT)
            .await
        {
            Ok(rows) => {
                let data = rows
                    .into_iter()
                    .map(CourseAssignmentResponse::from)
                    .collect();
                self.tracer
                    .complete_success(&tracing_ctx, method, "Course assignments fetched")
                    .await;
                Ok(ApiResponse::success(
                    "Course assignments fetched successfully",
                    data,
                ))
            }
            Err(e) => {
                error!("❌ Failed to fetch assignments for supervisor {supervisor_id}: {e}");
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch course assignments")
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }
}
