//! The HTTP surface the client consumes, behind a trait so the provider
//! and pollers can run against an in-memory fake.

use crate::{
    config::ClientConfig,
    errors::{AuthError, ClientError},
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{
        requests::LoginRequest,
        responses::{
            ActivityLogResponse, ApiResponse, CourseAssignmentResponse, NotificationResponse,
            UserResponse,
        },
    },
    errors::ErrorResponse,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub type DynPortalApi = Arc<dyn PortalApi + Send + Sync>;

#[async_trait]
pub trait PortalApi {
    async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ClientError>;
    /// `Ok(None)` when the server reports no session.
    async fn me(&self) -> Result<Option<UserResponse>, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn notifications(&self) -> Result<Vec<NotificationResponse>, ClientError>;
    async fn activity_logs(&self) -> Result<Vec<ActivityLogResponse>, ClientError>;
    async fn course_assignments(&self) -> Result<Vec<CourseAssignmentResponse>, ClientError>;
}

/// Talks to the portal over HTTP. The session cookie lives in reqwest's
/// cookie store, so one instance is one browser session.
#[derive(Clone)]
pub struct HttpPortalApi {
    client: Client,
    config: ClientConfig,
}

impl HttpPortalApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, config })
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        }
    }

    async fn read_data<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.json::<ApiResponse<T>>().await?;
            return Ok(body.data);
        }

        let message = Self::error_message(response).await;
        debug!("{path} answered {status}: {message}");

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(path.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AuthError::Rejected(message).into()
            }
            _ => ClientError::Network(format!("{status}: {message}")),
        })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.config.url(path)).send().await?;
        Self::read_data(path, response).await
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.config.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<ApiResponse<UserResponse>>().await?;
            return Ok(body.data);
        }

        let message = Self::error_message(response).await;
        warn!("Login for {username} rejected with {status}: {message}");

        Err(login_failure(status, message).into())
    }

    async fn me(&self) -> Result<Option<UserResponse>, ClientError> {
        match self.get_data::<UserResponse>("/api/auth/me").await {
            Ok(user) => Ok(Some(user)),
            Err(ClientError::Auth(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let path = "/api/auth/logout";
        let response = self.client.post(self.config.url(path)).send().await?;
        Self::read_data::<bool>(path, response).await.map(|_| ())
    }

    async fn notifications(&self) -> Result<Vec<NotificationResponse>, ClientError> {
        self.get_data("/api/notifications").await
    }

    async fn activity_logs(&self) -> Result<Vec<ActivityLogResponse>, ClientError> {
        self.get_data("/api/activity-logs").await
    }

    async fn course_assignments(&self) -> Result<Vec<CourseAssignmentResponse>, ClientError> {
        self.get_data("/api/supervisor/course-assignments").await
    }
}

/// The server answers both bad credentials and inactive accounts with 401;
/// its message tells them apart.
fn login_failure(status: StatusCode, message: String) -> AuthError {
    match status {
        StatusCode::UNAUTHORIZED if message.to_lowercase().contains("inactive") => {
            AuthError::InactiveAccount
        }
        StatusCode::UNAUTHORIZED => AuthError::InvalidCredentials,
        _ => AuthError::Rejected(message),
    }
}
