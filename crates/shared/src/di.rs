use crate::{
    abstract_trait::{
        DynActivityLogRepository, DynCourseAssignmentRepository, DynFeedService, DynHashing,
        DynJwtService, DynLoginThrottle, DynNotificationRepository, DynSessionStore,
        DynUserQueryRepository,
    },
    cache::{CacheStore, SessionStore},
    config::{ConnectionPool, RedisClient},
    repository::{
        ActivityLogRepository, CourseAssignmentRepository, NotificationRepository,
        UserQueryRepository,
    },
    service::{AuthService, AuthServiceDeps, FeedService, FeedServiceDeps},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub feed_service: DynFeedService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("feed_service", &"<FeedService>")
            .finish()
    }
}

/// Everything the services need, as trait objects. Production wiring goes
/// through [`DependenciesInjectDeps::from_infra`]; tests hand in their own.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub session: DynSessionStore,
    pub throttle: DynLoginThrottle,
    pub notifications: DynNotificationRepository,
    pub activity_logs: DynActivityLogRepository,
    pub assignments: DynCourseAssignmentRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInjectDeps {
    pub fn from_infra(
        pool: ConnectionPool,
        redis: &RedisClient,
        hash: DynHashing,
        jwt: DynJwtService,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        Self {
            hash,
            jwt,
            user_query: Arc::new(UserQueryRepository::new(pool.clone())) as DynUserQueryRepository,
            session: Arc::new(SessionStore::new(redis.pool.clone())) as DynSessionStore,
            throttle: Arc::new(CacheStore::new(redis.pool.clone())) as DynLoginThrottle,
            notifications: Arc::new(NotificationRepository::new(pool.clone()))
                as DynNotificationRepository,
            activity_logs: Arc::new(ActivityLogRepository::new(pool.clone()))
                as DynActivityLogRepository,
            assignments: Arc::new(CourseAssignmentRepository::new(pool))
                as DynCourseAssignmentRepository,
            registry,
        }
    }
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            hash,
            jwt,
            user_query,
            session,
            throttle,
            notifications,
            activity_logs,
            assignments,
            registry,
        } = deps;

        let auth_deps = AuthServiceDeps {
            hash,
            jwt,
            user_query,
            session,
            throttle,
            registry: registry.clone(),
        };

        let auth_service = AuthService::new(auth_deps).await;

        let feed_deps = FeedServiceDeps {
            notifications,
            activity_logs,
            assignments,
            registry,
        };

        let feed_service = Arc::new(FeedService::new(feed_deps).await) as DynFeedService;

        Self {
            auth_service,
            feed_service,
        }
    }
}
