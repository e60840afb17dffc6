use crate::{
    abstract_trait::{
        DynHashing, DynJwtService, DynLoginThrottle, DynSessionStore, DynUserQueryRepository,
        LoginServiceTrait,
    },
    domain::{
        requests::LoginRequest,
        responses::{LoginResponse, UserResponse},
        session::Session,
    },
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTracer},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub const MAX_FAILED_ATTEMPTS: u32 = 5;
pub const LOGIN_WINDOW_MINUTES: i64 = 15;

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    session: DynSessionStore,
    throttle: DynLoginThrottle,
    tracer: ServiceTracer,
}

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub query: DynUserQueryRepository,
    pub session: DynSessionStore,
    pub throttle: DynLoginThrottle,
    pub registry: Arc<Mutex<Registry>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            hash,
            jwt,
            query,
            session,
            throttle,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("login_service", &mut *registry.lock().await);

        Self {
            hash,
            jwt,
            query,
            session,
            throttle,
            tracer: ServiceTracer::new("login-service", Arc::new(Mutex::new(metrics))),
        }
    }

    /// Counts the attempt up front; a correct password clears the count.
    async fn claim_attempt(&self, attempts_key: &str) -> u32 {
        self.throttle
            .record_attempt(attempts_key, Duration::minutes(LOGIN_WINDOW_MINUTES))
            .await
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        let username = request.username.trim();

        info!("🔐 Attempting login for username: {username}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", username.to_string()),
            ],
        );

        let attempts_key = format!("auth:login_attempts:{}", username.to_lowercase());

        let attempts = self.claim_attempt(&attempts_key).await;
        if attempts > MAX_FAILED_ATTEMPTS {
            warn!("❌ Too many failed login attempts ({attempts}): {username}");
            self.tracer
                .complete_error(&tracing_ctx, method, "Too many failed login attempts")
                .await;
            return Err(ServiceError::TooManyAttempts);
        }

        let user = match self.query.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("❌ User not found: {username} (attempt {attempts})");
                self.tracer
                    .complete_error(&tracing_ctx, method, "User not found")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                error!("❌ Failed to query user: {}", err);
                self.tracer
                    .complete_error(&tracing_ctx, method, "Database error")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if self
            .hash
            .compare_password(&user.password, &request.password)
            .await
            .is_err()
        {
            error!("❌ Invalid password for user: {username} (attempt {attempts})");
            self.tracer
                .complete_error(&tracing_ctx, method, "Invalid password")
                .await;
            return Err(ServiceError::InvalidCredentials);
        }

        self.throttle.reset(&attempts_key).await;

        if !user.active {
            warn!("❌ Inactive account tried to log in: {username}");
            self.tracer
                .complete_error(&tracing_ctx, method, "Inactive account")
                .await;
            return Err(ServiceError::InactiveAccount);
        }

        let user = match UserResponse::try_from(user) {
            Ok(user) => user,
            Err(e) => {
                error!("❌ Stored role rejected for {username}: {e}");
                self.tracer
                    .complete_error(&tracing_ctx, method, "Invalid stored role")
                    .await;
                return Err(ServiceError::InvalidRole(e));
            }
        };

        let access_token = match self.jwt.generate_token(user.id) {
            Ok(token) => token,
            Err(e) => {
                error!("❌ Failed to generate access token: {:?}", e);
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to generate access token")
                    .await;
                return Err(e);
            }
        };

        let session = Session::new(&user);
        if !self
            .session
            .create_session(&Session::key(user.id), &session, Session::ttl())
            .await
        {
            self.tracer
                .complete_error(&tracing_ctx, method, "Failed to store session")
                .await;
            return Err(ServiceError::Internal("Failed to store session".to_string()));
        }

        info!("✅ Login successful for {username} as {}", user.role);

        self.tracer
            .complete_success(&tracing_ctx, method, "Login successful")
            .await;

        Ok(LoginResponse { user, access_token })
    }
}
