mod identity;
mod login;

use self::identity::{IdentityService, IdentityServiceDeps};
use self::login::{LoginService, LoginServiceDeps};
use crate::abstract_trait::{
    DynHashing, DynIdentityService, DynJwtService, DynLoginService, DynLoginThrottle,
    DynSessionStore, DynUserQueryRepository,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use self::login::{LOGIN_WINDOW_MINUTES, MAX_FAILED_ATTEMPTS};

#[derive(Clone)]
pub struct AuthService {
    pub login: DynLoginService,
    pub identity: DynIdentityService,
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub session: DynSessionStore,
    pub throttle: DynLoginThrottle,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let login_deps = LoginServiceDeps {
            hash: deps.hash.clone(),
            jwt: deps.jwt.clone(),
            query: deps.user_query.clone(),
            session: deps.session.clone(),
            throttle: deps.throttle.clone(),
            registry: deps.registry.clone(),
        };

        let login = Arc::new(LoginService::new(login_deps).await) as DynLoginService;

        let identity_deps = IdentityServiceDeps {
            user_query: deps.user_query.clone(),
            session: deps.session.clone(),
            registry: deps.registry.clone(),
        };

        let identity = Arc::new(IdentityService::new(identity_deps).await) as DynIdentityService;

        Self { login, identity }
    }
}
