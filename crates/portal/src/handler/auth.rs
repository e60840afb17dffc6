use crate::{
    handler::protected,
    middleware::{
        guard::RoleGate,
        jwt::{TOKEN_COOKIE, auth_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::{
    abstract_trait::{DynIdentityService, DynLoginService},
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, UserResponse},
        role::AllowedRoles,
        session::Session,
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub async fn health_checker_handler() -> Result<impl IntoResponse, HttpError> {
    const MESSAGE: &str = "Field training portal is up";

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": MESSAGE
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<UserResponse>),
        (status = 401, description = "Invalid credentials or inactive account"),
        (status = 429, description = "Too many failed attempts")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    jar: CookieJar,
    Extension(service): Extension<DynLoginService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;

    let cookie = Cookie::build((TOKEN_COOKIE, response.access_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        StatusCode::OK,
        jar.add(cookie),
        Json(ApiResponse::success("Login successful", response.user)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current session user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not logged in")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth",
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynIdentityService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_me(session.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session removed", body = ApiResponse<bool>),
        (status = 401, description = "Not logged in")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth",
)]
pub async fn logout_handler(
    jar: CookieJar,
    Extension(service): Extension<DynIdentityService>,
    Extension(user_id): Extension<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.logout(user_id).await?;

    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));

    Ok((StatusCode::OK, jar, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let services = &app_state.di_container.auth_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/healthchecker", get(health_checker_handler))
        .layer(Extension(services.login.clone()));

    // Logout only needs a valid token so an expired session can still clear
    // its cookie.
    let logout_routes = OpenApiRouter::new()
        .route("/api/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(services.identity.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    let session_routes = protected(
        OpenApiRouter::new().route("/api/auth/me", get(get_me_handler)),
        RoleGate::api(AllowedRoles::all()),
        &app_state,
    )
    .layer(Extension(services.identity.clone()));

    public_routes.merge(logout_routes).merge(session_routes)
}
