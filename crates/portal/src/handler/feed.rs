use crate::{handler::protected, middleware::guard::RoleGate, state::AppState};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use shared::{
    abstract_trait::DynFeedService,
    domain::{
        responses::{
            ActivityLogResponse, ApiResponse, CourseAssignmentResponse, NotificationResponse,
        },
        role::{AllowedRoles, Role},
        session::Session,
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications of the caller, newest first", body = ApiResponse<Vec<NotificationResponse>>),
        (status = 401, description = "Not logged in")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed",
)]
pub async fn get_notifications(
    Extension(service): Extension<DynFeedService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.notifications(session.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "No such notification for the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed",
)]
pub async fn mark_notification_read(
    Extension(service): Extension<DynFeedService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_notification_read(session.user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/activity-logs",
    responses(
        (status = 200, description = "Recent activity", body = ApiResponse<Vec<ActivityLogResponse>>),
        (status = 403, description = "Admins only")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed",
)]
pub async fn get_activity_logs(
    Extension(service): Extension<DynFeedService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.activity_logs().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/supervisor/course-assignments",
    responses(
        (status = 200, description = "Courses assigned to the caller", body = ApiResponse<Vec<CourseAssignmentResponse>>),
        (status = 403, description = "Supervisors only")
    ),
    security(("bearer_auth" = [])),
    tag = "Feed",
)]
pub async fn get_course_assignments(
    Extension(service): Extension<DynFeedService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.course_assignments(session.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn feed_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let feed = app_state.di_container.feed_service.clone();

    let notification_routes = protected(
        OpenApiRouter::new()
            .route("/api/notifications", get(get_notifications))
            .route("/api/notifications/{id}/read", patch(mark_notification_read)),
        RoleGate::api(AllowedRoles::all()),
        &app_state,
    );

    let admin_routes = protected(
        OpenApiRouter::new().route("/api/activity-logs", get(get_activity_logs)),
        RoleGate::api(Role::Admin),
        &app_state,
    );

    let supervisor_routes = protected(
        OpenApiRouter::new().route(
            "/api/supervisor/course-assignments",
            get(get_course_assignments),
        ),
        RoleGate::api(Role::Supervisor),
        &app_state,
    );

    notification_routes
        .merge(admin_routes)
        .merge(supervisor_routes)
        .layer(Extension(feed))
}
