use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig, RedisClient, RedisConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &self.jwt_config)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));

        info!("Initializing Redis connection for the portal");
        let redis_config = RedisConfig::new(
            config.redis_host.clone(),
            config.redis_port,
            config.redis_db,
            config.redis_password.clone(),
        );
        let redis = RedisClient::new(&redis_config).context("Failed to connect to Redis")?;

        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let deps =
            DependenciesInjectDeps::from_infra(pool, &redis, hashing, jwt_config, registry);

        let state = Self::from_deps(deps).await;

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Builds the state from already constructed dependencies, without
    /// touching Postgres or Redis.
    pub async fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let jwt_config = deps.jwt.clone();
        let registry = deps.registry.clone();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps).await;

        registry.lock().await.register_metrics(&system_metrics);

        Self {
            di_container,
            jwt_config,
            registry,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
