#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use client::{
    api::PortalApi,
    errors::{AuthError, ClientError},
};
use shared::domain::{
    responses::{ActivityLogResponse, CourseAssignmentResponse, NotificationResponse, UserResponse},
    role::Role,
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};
use std::time::Duration;

pub const PASSWORD: &str = "secret";

pub fn user(id: i32, username: &str, role: Role, active: bool) -> UserResponse {
    UserResponse {
        id,
        username: username.to_string(),
        name: username.to_uppercase(),
        role,
        active,
    }
}

/// In-memory stand-in for the portal: a user table and one server session.
pub struct FakeApi {
    users: Vec<UserResponse>,
    session: Mutex<Option<UserResponse>>,
    pub me_fails: AtomicBool,
    /// Delay between reading the server session and answering `me`.
    pub me_delay_ms: AtomicU64,
    pub me_calls: AtomicUsize,
    pub logout_fails: AtomicBool,
    pub notifications_fail: AtomicBool,
    pub logout_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            users: vec![
                user(1, "admin", Role::Admin, true),
                user(2, "supervisor", Role::Supervisor, true),
                user(3, "student", Role::Student, true),
                user(4, "dormant", Role::Student, false),
            ],
            session: Mutex::new(None),
            me_fails: AtomicBool::new(false),
            me_delay_ms: AtomicU64::new(0),
            me_calls: AtomicUsize::new(0),
            logout_fails: AtomicBool::new(false),
            notifications_fail: AtomicBool::new(false),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_session(self, username: &str) -> Self {
        let found = self.users.iter().find(|u| u.username == username).cloned();
        *self.session.lock().unwrap() = found;
        self
    }

    pub fn server_session(&self) -> Option<UserResponse> {
        self.session.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortalApi for FakeApi {
    async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ClientError> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username)
            .filter(|_| password == PASSWORD)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.active {
            return Err(AuthError::InactiveAccount.into());
        }

        *self.session.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn me(&self) -> Result<Option<UserResponse>, ClientError> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        if self.me_fails.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection refused".into()));
        }
        let snapshot = self.server_session();
        let delay = self.me_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(snapshot)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection reset".into()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn notifications(&self) -> Result<Vec<NotificationResponse>, ClientError> {
        if self.notifications_fail.load(Ordering::SeqCst) {
            return Err(ClientError::Network("500: Repository error".into()));
        }
        Ok(vec![
            NotificationResponse {
                id: 1,
                title: "Placement".into(),
                message: "Confirmed".into(),
                is_read: false,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
            },
            NotificationResponse {
                id: 2,
                title: "Welcome".into(),
                message: "Hello".into(),
                is_read: true,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap(),
            },
        ])
    }

    async fn activity_logs(&self) -> Result<Vec<ActivityLogResponse>, ClientError> {
        Ok(vec![ActivityLogResponse {
            id: 9,
            action: "login".into(),
            description: "admin signed in".into(),
            read: false,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        }])
    }

    async fn course_assignments(&self) -> Result<Vec<CourseAssignmentResponse>, ClientError> {
        Ok(Vec::new())
    }
}
