use crate::{
    guard::{DynNavigator, GuardState, GuardView, RoleGuard},
    provider::AuthHandle,
};
use shared::domain::{
    page::Page,
    role::Role,
};

/// What the client should show for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    /// Access was denied and a redirect is under way.
    Blank,
    Login,
    NotFound,
    Page(Page),
}

/// Client-side route table: one guard per role in front of its pages.
pub struct Router {
    auth: AuthHandle,
    admin: RoleGuard,
    supervisor: RoleGuard,
    student: RoleGuard,
}

impl Router {
    pub fn new(auth: AuthHandle, navigator: DynNavigator) -> Self {
        Self {
            admin: RoleGuard::admin(auth.clone(), navigator.clone()),
            supervisor: RoleGuard::supervisor(auth.clone(), navigator.clone()),
            student: RoleGuard::student(auth.clone(), navigator),
            auth,
        }
    }

    fn guard(&self, role: Role) -> &RoleGuard {
        match role {
            Role::Admin => &self.admin,
            Role::Supervisor => &self.supervisor,
            Role::Student => &self.student,
        }
    }

    pub fn resolve(&self, path: &str) -> View {
        if path.trim_end_matches('/').is_empty() {
            return self.dispatch_root();
        }

        match Page::from_path(path) {
            Some(Page::Login) => View::Login,
            Some(page) => match page.required_role() {
                Some(role) => match self.guard(role).render(|| View::Page(page)) {
                    GuardView::Loading => View::Loading,
                    GuardView::Nothing => View::Blank,
                    GuardView::Content(view) => view,
                },
                None => View::Page(page),
            },
            None => View::NotFound,
        }
    }

    /// Tries the admin, supervisor and student guards in order without
    /// letting them redirect.
    fn dispatch_root(&self) -> View {
        if self.auth.current().loading {
            return View::Loading;
        }

        Role::ALL
            .into_iter()
            .find(|role| self.guard(*role).check() == GuardState::Granted)
            .map(|role| View::Page(Page::dashboard(role)))
            .unwrap_or(View::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{guard::History, provider::AuthState};
    use shared::domain::responses::UserResponse;
    use std::sync::Arc;
    use tokio::sync::watch;

    fn signed_in(role: Role) -> AuthState {
        AuthState::signed_in(UserResponse {
            id: 3,
            username: "budi".into(),
            name: "Budi".into(),
            role,
            active: true,
        })
    }

    fn router(state: AuthState) -> (watch::Sender<AuthState>, Router, Arc<History>) {
        let (tx, rx) = watch::channel(state);
        let history = Arc::new(History::default());
        let router = Router::new(AuthHandle::from(rx), history.clone());
        (tx, router, history)
    }

    #[test]
    fn student_cannot_reach_admin_dashboard() {
        let (_tx, router, history) = router(signed_in(Role::Student));

        assert_eq!(router.resolve("/admin/dashboard"), View::Blank);
        assert_eq!(history.last().as_deref(), Some("/login"));
    }

    #[test]
    fn admin_reaches_students_page() {
        let (_tx, router, history) = router(signed_in(Role::Admin));

        assert_eq!(
            router.resolve("/admin/students"),
            View::Page(Page::AdminStudents)
        );
        assert!(history.visits().is_empty());
    }

    #[test]
    fn root_dispatches_by_role() {
        for role in Role::ALL {
            let (_tx, router, history) = router(signed_in(role));
            assert_eq!(router.resolve("/"), View::Page(Page::dashboard(role)));
            assert!(history.visits().is_empty());
        }

        let (_tx, router, history) = router(AuthState::anonymous());
        assert_eq!(router.resolve("/"), View::Login);
        assert!(history.visits().is_empty());
    }

    #[test]
    fn root_waits_while_loading() {
        let (_tx, router, _history) = router(AuthState::loading());
        assert_eq!(router.resolve("/"), View::Loading);
        assert_eq!(router.resolve("/student/results"), View::Loading);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let (_tx, router, _history) = router(signed_in(Role::Admin));
        assert_eq!(router.resolve("/admin/nope"), View::NotFound);
        assert_eq!(router.resolve("/login"), View::Login);
    }

    #[test]
    fn logout_flips_granted_page_to_redirect() {
        let (tx, router, history) = router(signed_in(Role::Supervisor));
        assert_eq!(
            router.resolve("/supervisor/evaluations"),
            View::Page(Page::SupervisorEvaluations)
        );

        tx.send_replace(AuthState::anonymous());

        assert_eq!(router.resolve("/supervisor/evaluations"), View::Blank);
        assert_eq!(history.visits(), vec!["/login".to_string()]);
    }
}
