#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::{Duration, TimeZone, Utc};
use portal::{handler::AppRouter, state::AppState};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{
        ActivityLogRepositoryTrait, CourseAssignmentRepositoryTrait, DynActivityLogRepository,
        DynCourseAssignmentRepository, DynHashing, DynJwtService, DynLoginThrottle,
        DynNotificationRepository, DynSessionStore, DynUserQueryRepository, HashingTrait,
        LoginThrottleTrait, NotificationRepositoryTrait, SessionStoreTrait,
        UserQueryRepositoryTrait,
    },
    config::{Hashing, JwtConfig},
    di::DependenciesInjectDeps,
    domain::session::Session,
    errors::RepositoryError,
    model::{ActivityLog, CourseAssignment, Notification, User},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;

pub const PASSWORD: &str = "field-training";

pub struct InMemoryUsers(Mutex<Vec<User>>);

impl InMemoryUsers {
    pub fn update(&self, id: i32, change: impl FnOnce(&mut User)) {
        let mut users = self.0.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == id).expect("seeded user");
        change(user);
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemorySessions(Mutex<HashMap<String, Session>>);

impl InMemorySessions {
    pub fn contains(&self, key: &str) -> bool {
        self.0.lock().unwrap().contains_key(key)
    }

    pub fn expire(&self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }
}

#[async_trait]
impl SessionStoreTrait for InMemorySessions {
    async fn create_session(&self, session_id: &str, session: &Session, _ttl: Duration) -> bool {
        self.0
            .lock()
            .unwrap()
            .insert(session_id.to_string(), session.clone());
        true
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        self.0.lock().unwrap().get(session_id).cloned()
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        self.0.lock().unwrap().remove(session_id).is_some()
    }

    async fn refresh_session(&self, session_id: &str, _ttl: Duration) -> bool {
        self.contains(session_id)
    }
}

#[derive(Default)]
pub struct InMemoryThrottle(Mutex<HashMap<String, u32>>);

#[async_trait]
impl LoginThrottleTrait for InMemoryThrottle {
    async fn record_attempt(&self, key: &str, _window: Duration) -> u32 {
        let mut map = self.0.lock().unwrap();
        let count = map.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn reset(&self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }
}

pub struct InMemoryNotifications(Mutex<Vec<Notification>>);

#[async_trait]
impl NotificationRepositoryTrait for InMemoryNotifications {
    async fn find_by_user(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut rows: Vec<Notification> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;
        row.is_read = true;
        Ok(row.clone())
    }
}

pub struct InMemoryActivity(Vec<ActivityLog>);

#[async_trait]
impl ActivityLogRepositoryTrait for InMemoryActivity {
    async fn find_recent(&self, limit: i64) -> Result<Vec<ActivityLog>, RepositoryError> {
        Ok(self.0.iter().take(limit as usize).cloned().collect())
    }
}

pub struct InMemoryAssignments(Vec<CourseAssignment>);

#[async_trait]
impl CourseAssignmentRepositoryTrait for InMemoryAssignments {
    async fn find_by_supervisor(
        &self,
        supervisor_id: i32,
        limit: i64,
    ) -> Result<Vec<CourseAssignment>, RepositoryError> {
        Ok(self
            .0
            .iter()
            .filter(|a| a.supervisor_id == supervisor_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

fn user(id: i32, username: &str, role: &str, active: bool, password: &str) -> User {
    User {
        id,
        username: username.to_string(),
        name: format!("{username} user"),
        password: password.to_string(),
        role: role.to_string(),
        active,
        created_at: None,
        updated_at: None,
    }
}

pub const ADMIN_ID: i32 = 1;
pub const SUPERVISOR_ID: i32 = 2;
pub const STUDENT_ID: i32 = 3;

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
}

impl TestApp {
    pub async fn new() -> Self {
        let hashing = Hashing::with_cost(4);
        let hashed = hashing
            .hash_password(PASSWORD)
            .await
            .expect("hashing test password");

        let users = vec![
            user(ADMIN_ID, "admin", "admin", true, &hashed),
            user(SUPERVISOR_ID, "supervisor", "supervisor", true, &hashed),
            user(STUDENT_ID, "student", "student", true, &hashed),
            user(4, "dormant", "student", false, &hashed),
            user(5, "visitor", "guest", true, &hashed),
        ];

        let at = |minute: u32| Utc.with_ymd_and_hms(2025, 3, 1, 8, minute, 0).unwrap();

        let notifications = vec![
            Notification {
                id: 10,
                user_id: STUDENT_ID,
                title: "Placement confirmed".into(),
                message: "You are placed at the city hospital".into(),
                is_read: false,
                created_at: at(5),
            },
            Notification {
                id: 11,
                user_id: STUDENT_ID,
                title: "Welcome".into(),
                message: "Your account is ready".into(),
                is_read: true,
                created_at: at(1),
            },
            Notification {
                id: 12,
                user_id: ADMIN_ID,
                title: "Import finished".into(),
                message: "42 students imported".into(),
                is_read: false,
                created_at: at(3),
            },
        ];

        let activity = vec![ActivityLog {
            id: 20,
            user_id: Some(SUPERVISOR_ID),
            action: "evaluation.submitted".into(),
            description: "Evaluation submitted for student".into(),
            is_read: false,
            created_at: at(7),
        }];

        let assignments = vec![CourseAssignment {
            id: 30,
            supervisor_id: SUPERVISOR_ID,
            course_id: 300,
            course_name: "Clinical Practice I".into(),
            assigned_at: at(9),
        }];

        let users = Arc::new(InMemoryUsers(Mutex::new(users)));
        let sessions = Arc::new(InMemorySessions::default());

        let deps = DependenciesInjectDeps {
            hash: Arc::new(hashing) as DynHashing,
            jwt: Arc::new(JwtConfig::new("integration-test-secret")) as DynJwtService,
            user_query: users.clone() as DynUserQueryRepository,
            session: sessions.clone() as DynSessionStore,
            throttle: Arc::new(InMemoryThrottle::default()) as DynLoginThrottle,
            notifications: Arc::new(InMemoryNotifications(Mutex::new(notifications)))
                as DynNotificationRepository,
            activity_logs: Arc::new(InMemoryActivity(activity)) as DynActivityLogRepository,
            assignments: Arc::new(InMemoryAssignments(assignments))
                as DynCourseAssignmentRepository,
            registry: Arc::new(tokio::sync::Mutex::new(Registry::default())),
        };

        let state = AppState::from_deps(deps).await;

        Self {
            router: AppRouter::build(state),
            users,
            sessions,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, json: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(json.to_string())).unwrap())
            .await
    }

    pub async fn patch(&self, path: &str, cookie: &str) -> Response<Body> {
        let request = Request::builder()
            .method("PATCH")
            .uri(path)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn try_login(&self, username: &str, password: &str) -> Response<Body> {
        let body = serde_json::json!({ "username": username, "password": password }).to_string();
        self.post("/api/auth/login", None, &body).await
    }

    /// Logs in and returns the `token=...` pair to send back as a cookie.
    pub async fn login(&self, username: &str) -> String {
        let response = self.try_login(username, PASSWORD).await;
        assert_eq!(response.status(), 200, "login of {username} failed");
        token_cookie(&response).expect("login sets the token cookie")
    }
}

pub fn token_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("reading body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}
