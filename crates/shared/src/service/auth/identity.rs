use crate::{
    abstract_trait::{DynSessionStore, DynUserQueryRepository, IdentityServiceTrait},
    domain::{
        responses::{ApiResponse, UserResponse},
        session::Session,
    },
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct IdentityService {
    user_query: DynUserQueryRepository,
    session: DynSessionStore,
    tracer: ServiceTracer,
}

pub struct IdentityServiceDeps {
    pub user_query: DynUserQueryRepository,
    pub session: DynSessionStore,
    pub registry: Arc<Mutex<Registry>>,
}

impl IdentityService {
    pub async fn new(deps: IdentityServiceDeps) -> Self {
        let IdentityServiceDeps {
            user_query,
            session,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("identity_service", &mut *registry.lock().await);

        Self {
            user_query,
            session,
            tracer: ServiceTracer::new("identity-service", Arc::new(Mutex::new(metrics))),
        }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let user = match self.user_query.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "User not found")
                    .await;
                return Err(ServiceError::SessionNotFound);
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Database error")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        if !user.active {
            warn!("Account {user_id} was deactivated, dropping its session");
            self.session.delete_session(&Session::key(user_id)).await;
            self.tracer
                .complete_error(&tracing_ctx, method, "Inactive account")
                .await;
            return Err(ServiceError::InactiveAccount);
        }

        let user = UserResponse::try_from(user)?;

        self.tracer
            .complete_success(&tracing_ctx, method, "User fetched")
            .await;

        Ok(ApiResponse::success("User fetched successfully", user))
    }

    async fn logout(&self, user_id: i32) -> Result<ApiResponse<bool>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "Logout",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let deleted = self.session.delete_session(&Session::key(user_id)).await;

        info!("👋 Logged out user {user_id} (session removed: {deleted})");

        self.tracer
            .complete_success(&tracing_ctx, method, "Logout successful")
            .await;

        Ok(ApiResponse::success("Logged out", deleted))
    }

    async fn resume_session(&self, user_id: i32) -> Result<Session, ServiceError> {
        let key = Session::key(user_id);

        let Some(mut session) = self.session.get_session(&key).await else {
            debug!("No live session for user {user_id}");
            return Err(ServiceError::SessionNotFound);
        };

        let user = match self.user_query.find_by_id(user_id).await? {
            Some(user) if user.active => UserResponse::try_from(user)?,
            Some(_) => {
                warn!("Account {user_id} was deactivated, dropping its session");
                self.session.delete_session(&key).await;
                return Err(ServiceError::InactiveAccount);
            }
            None => {
                warn!("Account {user_id} no longer exists, dropping its session");
                self.session.delete_session(&key).await;
                return Err(ServiceError::SessionNotFound);
            }
        };

        if session.role != user.role {
            info!("Role of user {user_id} changed to {}, rewriting session", user.role);
            session.role = user.role;
            self.session.create_session(&key, &session, Session::ttl()).await;
        } else {
            self.session.refresh_session(&key, Session::ttl()).await;
        }

        Ok(session)
    }
}
