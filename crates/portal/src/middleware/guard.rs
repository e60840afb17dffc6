use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use shared::{
    domain::{page::LOGIN_PATH, role::AllowedRoles, session::Session},
    errors::ErrorResponse,
};
use tracing::info;

/// What a denied request gets back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// `401` without a session, `403` with the wrong role.
    Json,
    /// `303 See Other` to the given path.
    Redirect(&'static str),
}

/// Role gate installed in front of a group of routes with
/// `middleware::from_fn_with_state(gate, require_roles)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    pub allowed: AllowedRoles,
    pub denial: Denial,
}

impl RoleGate {
    pub fn api(allowed: impl Into<AllowedRoles>) -> Self {
        Self {
            allowed: allowed.into(),
            denial: Denial::Json,
        }
    }

    pub fn page(allowed: impl Into<AllowedRoles>) -> Self {
        Self {
            allowed: allowed.into(),
            denial: Denial::Redirect(LOGIN_PATH),
        }
    }

    pub fn with_redirect(mut self, path: &'static str) -> Self {
        self.denial = Denial::Redirect(path);
        self
    }

    fn deny(&self, session: Option<&Session>) -> Response {
        match self.denial {
            Denial::Redirect(path) => Redirect::to(path).into_response(),
            Denial::Json => match session {
                None => (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::fail("You are not logged in")),
                )
                    .into_response(),
                Some(session) => (
                    StatusCode::FORBIDDEN,
                    Json(ErrorResponse::fail(format!(
                        "Role {} may not access this resource, requires: {}",
                        session.role, self.allowed
                    ))),
                )
                    .into_response(),
            },
        }
    }
}

/// Runs the wrapped handler only when the request carries an active session
/// whose role is in the gate's set. The handler is never invoked otherwise.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match req.extensions().get::<Session>() {
        Some(session) if session.is_allowed(gate.allowed) => next.run(req).await,
        session => {
            info!(
                "🚫 Denied {} for {} (allowed: {})",
                req.uri().path(),
                session
                    .map(|s| format!("{} ({})", s.username, s.role))
                    .unwrap_or_else(|| "anonymous".to_string()),
                gate.allowed
            );
            gate.deny(session)
        }
    }
}
