//! Role guard: decides whether a child view may be produced for the
//! current session.
//!
//! A guard is `Checking` while the provider is still loading, `Denied` when
//! there is no session or the role is outside the allowed set, and
//! `Granted` otherwise. A denial navigates to the redirect path once; the
//! guard re-arms as soon as it leaves `Denied`.

use crate::provider::AuthHandle;
use shared::domain::{
    page::LOGIN_PATH,
    role::{AllowedRoles, Role},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tracing::debug;

pub trait Navigator {
    fn navigate(&self, path: &str);
}

pub type DynNavigator = Arc<dyn Navigator + Send + Sync>;

/// Navigator that records every visit. Handy for headless consumers.
#[derive(Debug, Default)]
pub struct History {
    visits: Mutex<Vec<String>>,
}

impl History {
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Denied,
    Granted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<T> {
    /// Loading placeholder.
    Loading,
    /// Denied; a redirect has been requested instead.
    Nothing,
    Content(T),
}

pub struct RoleGuard {
    allowed: AllowedRoles,
    redirect_path: String,
    auth: AuthHandle,
    navigator: DynNavigator,
    redirected: AtomicBool,
}

impl RoleGuard {
    pub fn new(
        allowed: impl Into<AllowedRoles>,
        redirect_path: impl Into<String>,
        auth: AuthHandle,
        navigator: DynNavigator,
    ) -> Self {
        Self {
            allowed: allowed.into(),
            redirect_path: redirect_path.into(),
            auth,
            navigator,
            redirected: AtomicBool::new(false),
        }
    }

    fn for_role(role: Role, auth: AuthHandle, navigator: DynNavigator) -> Self {
        Self::new(role, LOGIN_PATH, auth, navigator)
    }

    /// Admin-only guard redirecting to `/login`.
    pub fn admin(auth: AuthHandle, navigator: DynNavigator) -> Self {
        Self::for_role(Role::Admin, auth, navigator)
    }

    pub fn supervisor(auth: AuthHandle, navigator: DynNavigator) -> Self {
        Self::for_role(Role::Supervisor, auth, navigator)
    }

    pub fn student(auth: AuthHandle, navigator: DynNavigator) -> Self {
        Self::for_role(Role::Student, auth, navigator)
    }

    pub fn with_redirect(mut self, redirect_path: impl Into<String>) -> Self {
        self.redirect_path = redirect_path.into();
        self
    }

    pub fn allowed(&self) -> AllowedRoles {
        self.allowed
    }

    pub fn redirect_path(&self) -> &str {
        &self.redirect_path
    }

    /// Current decision, without side effects.
    pub fn check(&self) -> GuardState {
        let state = self.auth.current();

        if state.loading {
            return GuardState::Checking;
        }

        match state.user {
            Some(user) if user.active && self.allowed.contains(user.role) => GuardState::Granted,
            _ => GuardState::Denied,
        }
    }

    /// Like [`check`](Self::check), but a fresh denial triggers the redirect.
    pub fn evaluate(&self) -> GuardState {
        let state = self.check();

        if state == GuardState::Denied {
            if !self.redirected.swap(true, Ordering::SeqCst) {
                debug!("Guard for {} redirecting to {}", self.allowed, self.redirect_path);
                self.navigator.navigate(&self.redirect_path);
            }
        } else {
            self.redirected.store(false, Ordering::SeqCst);
        }

        state
    }

    /// Produces the child only when access is granted.
    pub fn render<T>(&self, child: impl FnOnce() -> T) -> GuardView<T> {
        match self.evaluate() {
            GuardState::Checking => GuardView::Loading,
            GuardState::Denied => GuardView::Nothing,
            GuardState::Granted => GuardView::Content(child()),
        }
    }
}
