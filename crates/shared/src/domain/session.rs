use crate::domain::{
    responses::UserResponse,
    role::{AllowedRoles, Role},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const SESSION_TTL_MINUTES: i64 = 30;

/// Server-side session record, keyed by [`Session::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn key(user_id: i32) -> String {
        format!("session:{user_id}")
    }

    /// Idle lifetime; every authenticated request pushes it forward again.
    pub fn ttl() -> Duration {
        Duration::minutes(SESSION_TTL_MINUTES)
    }

    pub fn new(user: &UserResponse) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            active: user.active,
            created_at: Utc::now(),
        }
    }

    pub fn is_allowed(&self, allowed: AllowedRoles) -> bool {
        self.active && allowed.contains(self.role)
    }
}

impl From<Session> for UserResponse {
    fn from(value: Session) -> Self {
        UserResponse {
            id: value.user_id,
            username: value.username,
            name: value.name,
            role: value.role,
            active: value.active,
        }
    }
}
