use crate::middleware::jwt::extract_token;
use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::{DynIdentityService, DynJwtService},
    errors::{HttpError, ServiceError},
};
use tracing::debug;

/// Loads the redis session of the authenticated user id, re-checks the
/// account and pushes the session expiry forward. Must run after
/// `auth_middleware`.
pub async fn session_middleware(
    Extension(identity): Extension<DynIdentityService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let user_id = match req.extensions().get::<i32>() {
        Some(id) => *id,
        None => {
            return Err(HttpError::Unauthorized(
                "Missing user_id in request context".into(),
            ));
        }
    };

    let session = identity
        .resume_session(user_id)
        .await
        .map_err(|e| match e {
            ServiceError::SessionNotFound => HttpError::Unauthorized(
                "Session expired or not found, please log in again".into(),
            ),
            other => HttpError::from(other),
        })?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Page variant: resolves the session when there is one and lets the
/// request through either way. Role gates decide what an anonymous
/// request may see.
pub async fn optional_session_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    Extension(identity): Extension<DynIdentityService>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let user_id = extract_token(&cookie_jar, req.headers())
        .and_then(|token| jwt.verify_token(&token).ok());

    if let Some(user_id) = user_id {
        match identity.resume_session(user_id).await {
            Ok(session) => {
                req.extensions_mut().insert(user_id);
                req.extensions_mut().insert(session);
            }
            Err(e) => debug!("Token for user {user_id} has no usable session: {e}"),
        }
    }

    next.run(req).await
}
