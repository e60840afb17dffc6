//! Server-rendered pages.
//!
//! Every guarded path sits behind `require_roles` for its role, so a page
//! body is only ever rendered for a session that passed the gate. `/`
//! dispatches to the caller's dashboard and unknown paths fall through to
//! the not-found page.

use crate::{
    middleware::{
        guard::{RoleGate, require_roles},
        session::optional_session_middleware,
    },
    state::AppState,
};
use askama::Template;
use axum::{
    Extension, Router,
    http::{Extensions, StatusCode},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use shared::{
    domain::{
        page::{LOGIN_PATH, Page, ROOT_PATH},
        role::Role,
        session::Session,
    },
    errors::HttpError,
};
use std::sync::Arc;
use tracing::error;

struct NavLink {
    path: &'static str,
    title: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    user_name: &'a str,
    role: &'a str,
    nav: Vec<NavLink>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    title: &'a str,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    title: &'a str,
    home: &'a str,
}

fn render<T: Template>(template: &T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|e| {
        error!("❌ Failed to render template: {e}");
        HttpError::Internal("Failed to render page".to_string())
    })
}

fn render_page(page: Page, session: &Session) -> Result<Html<String>, HttpError> {
    let nav = Page::for_role(session.role)
        .filter_map(|p| {
            p.path().map(|path| NavLink {
                path,
                title: p.title(),
                active: p == page,
            })
        })
        .collect();

    render(&PageTemplate {
        title: page.title(),
        user_name: &session.name,
        role: session.role.as_str(),
        nav,
    })
}

pub async fn login_page() -> Result<Html<String>, HttpError> {
    render(&LoginTemplate {
        title: Page::Login.title(),
    })
}

/// First role (admin, supervisor, student) whose gate the session passes
/// picks the dashboard; anyone else is sent to sign in.
pub async fn root_handler(extensions: Extensions) -> Redirect {
    let dashboard = extensions.get::<Session>().and_then(|session| {
        Role::ALL
            .into_iter()
            .find(|role| session.is_allowed((*role).into()))
    });

    match dashboard {
        Some(role) => Redirect::to(role.dashboard_path()),
        None => Redirect::to(LOGIN_PATH),
    }
}

pub async fn not_found_handler() -> Response {
    let body = render(&NotFoundTemplate {
        title: Page::NotFound.title(),
        home: ROOT_PATH,
    });

    match body {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

fn role_pages(role: Role) -> Router {
    Page::for_role(role)
        .filter_map(|page| page.path().map(|path| (page, path)))
        .fold(Router::new(), |router, (page, path)| {
            router.route(
                path,
                get(move |Extension(session): Extension<Session>| async move {
                    render_page(page, &session)
                }),
            )
        })
        .route_layer(middleware::from_fn_with_state(
            RoleGate::page(role),
            require_roles,
        ))
}

pub fn page_routes(app_state: Arc<AppState>) -> Router {
    let guarded = Role::ALL
        .into_iter()
        .fold(Router::new(), |router, role| router.merge(role_pages(role)));

    Router::new()
        .route(ROOT_PATH, get(root_handler))
        .route(LOGIN_PATH, get(login_page))
        .merge(guarded)
        .fallback(not_found_handler)
        .layer(middleware::from_fn(optional_session_middleware))
        .layer(Extension(app_state.di_container.auth_service.identity.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
