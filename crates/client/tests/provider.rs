mod common;

use client::{
    errors::{AuthError, ClientError},
    guard::{GuardState, History, RoleGuard},
    provider::{AuthProvider, AuthState, Credentials},
    router::{Router, View},
};
use common::{FakeApi, PASSWORD};
use shared::domain::{page::Page, role::Role};
use std::sync::{Arc, atomic::Ordering};

#[tokio::test]
async fn starts_loading_until_session_check() {
    let api = Arc::new(FakeApi::new().with_session("admin"));
    let provider = AuthProvider::new(api);

    assert_eq!(provider.state(), AuthState::loading());

    let state = provider.check_session().await;
    assert!(!state.loading);
    assert_eq!(state.role(), Some(Role::Admin));
}

#[tokio::test]
async fn failed_session_check_reads_as_logged_out() {
    let api = Arc::new(FakeApi::new().with_session("admin"));
    api.me_fails.store(true, Ordering::SeqCst);
    let provider = AuthProvider::new(api);
    let history = Arc::new(History::default());
    let guard = RoleGuard::admin(provider.subscribe(), history.clone());

    assert_eq!(guard.evaluate(), GuardState::Checking);
    assert!(history.visits().is_empty());

    provider.check_session().await;

    assert_eq!(provider.state(), AuthState::anonymous());
    assert_eq!(guard.evaluate(), GuardState::Denied);
    assert_eq!(history.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn login_populates_user() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));

    let user = provider
        .login(&Credentials::new("student", PASSWORD))
        .await
        .unwrap();

    assert_eq!(user.role, Role::Student);
    assert_eq!(provider.state().user, Some(user));
}

#[tokio::test]
async fn invalid_credentials_and_inactive_accounts_fail() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));

    let bad = provider.login(&Credentials::new("student", "nope")).await;
    assert_eq!(bad, Err(ClientError::Auth(AuthError::InvalidCredentials)));

    let dormant = provider.login(&Credentials::new("dormant", PASSWORD)).await;
    assert_eq!(dormant, Err(ClientError::Auth(AuthError::InactiveAccount)));
    assert!(provider.state().user.is_none());
}

#[tokio::test]
async fn wrong_role_login_fails_and_clears_state() {
    let api = Arc::new(FakeApi::new());
    let provider = AuthProvider::new(api.clone());

    let result = provider
        .login(&Credentials::new("student", PASSWORD).expecting(Role::Admin))
        .await;

    assert_eq!(
        result,
        Err(ClientError::Auth(AuthError::WrongRole {
            expected: Role::Admin,
            actual: Role::Student,
        }))
    );
    assert_eq!(provider.state(), AuthState::anonymous());
    assert!(api.server_session().is_none());
}

#[tokio::test]
async fn logout_clears_state_even_when_server_fails() {
    let api = Arc::new(FakeApi::new());
    let provider = AuthProvider::new(api.clone());
    provider
        .login(&Credentials::new("admin", PASSWORD))
        .await
        .unwrap();

    api.logout_fails.store(true, Ordering::SeqCst);
    let result = provider.logout().await;

    assert!(matches!(result, Err(ClientError::Network(_))));
    assert_eq!(provider.state(), AuthState::anonymous());
    assert_eq!(api.logout_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn logout_flips_guard_on_next_evaluation() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));
    let history = Arc::new(History::default());
    let guard = RoleGuard::admin(provider.subscribe(), history.clone());

    provider
        .login(&Credentials::new("admin", PASSWORD))
        .await
        .unwrap();
    assert_eq!(guard.evaluate(), GuardState::Granted);

    provider.logout().await.unwrap();

    assert_eq!(guard.evaluate(), GuardState::Denied);
    assert_eq!(history.last().as_deref(), Some("/login"));
}

#[tokio::test]
async fn subscribers_observe_changes() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));
    let mut handle = provider.subscribe();

    provider
        .login(&Credentials::new("supervisor", PASSWORD))
        .await
        .unwrap();

    let state = handle.changed().await.expect("provider alive");
    assert_eq!(state.role(), Some(Role::Supervisor));
}

#[tokio::test]
async fn student_is_redirected_from_admin_dashboard() {
    let api = Arc::new(FakeApi::new().with_session("student"));
    let provider = AuthProvider::new(api);
    let history = Arc::new(History::default());
    let router = Router::new(provider.subscribe(), history.clone());

    assert_eq!(router.resolve("/admin/dashboard"), View::Loading);
    assert!(history.visits().is_empty());

    provider.check_session().await;

    assert_eq!(router.resolve("/admin/dashboard"), View::Blank);
    assert_eq!(history.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn admin_login_then_students_page() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));
    let history = Arc::new(History::default());
    let router = Router::new(provider.subscribe(), history.clone());

    provider.check_session().await;
    provider
        .login(&Credentials::new("admin", PASSWORD))
        .await
        .unwrap();

    assert_eq!(
        router.resolve("/admin/students"),
        View::Page(Page::AdminStudents)
    );
    assert_eq!(router.resolve("/"), View::Page(Page::AdminDashboard));
    assert!(history.visits().is_empty());
}

#[tokio::test]
async fn no_session_sends_guarded_routes_to_login() {
    let provider = AuthProvider::new(Arc::new(FakeApi::new()));
    let history = Arc::new(History::default());
    let router = Router::new(provider.subscribe(), history.clone());

    let state = provider.check_session().await;
    assert_eq!(state, AuthState::anonymous());

    assert_eq!(router.resolve("/student/courses"), View::Blank);
    assert_eq!(router.resolve("/"), View::Login);
    assert_eq!(history.visits(), vec!["/login".to_string()]);
}

async fn until_session_check_started(api: &FakeApi) {
    while api.me_calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn slow_session_check_does_not_undo_login() {
    let api = Arc::new(FakeApi::new());
    api.me_delay_ms.store(5_000, Ordering::SeqCst);
    let provider = Arc::new(AuthProvider::new(api.clone()));

    let check = tokio::spawn({
        let provider = provider.clone();
        async move { provider.check_session().await }
    });
    until_session_check_started(&api).await;

    let user = provider
        .login(&Credentials::new("admin", PASSWORD))
        .await
        .unwrap();

    let seen_by_check = check.await.unwrap();

    assert_eq!(seen_by_check.user, Some(user.clone()));
    assert_eq!(provider.state(), AuthState::signed_in(user));
}

#[tokio::test(start_paused = true)]
async fn slow_session_check_does_not_restore_logged_out_user() {
    let api = Arc::new(FakeApi::new().with_session("supervisor"));
    let provider = Arc::new(AuthProvider::new(api.clone()));
    provider.check_session().await;
    assert_eq!(provider.state().role(), Some(Role::Supervisor));

    api.me_calls.store(0, Ordering::SeqCst);
    api.me_delay_ms.store(5_000, Ordering::SeqCst);

    let check = tokio::spawn({
        let provider = provider.clone();
        async move { provider.check_session().await }
    });
    until_session_check_started(&api).await;

    provider.logout().await.unwrap();
    check.await.unwrap();

    assert_eq!(provider.state(), AuthState::anonymous());
}
