use anyhow::{Context, Result};
use dotenv::dotenv;
use portal::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager},
    utils::{Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("portal", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize otel logger")?;
    telemetry
        .init_meter()
        .context("Failed to initialize otel meter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize otel tracer")?;

    init_logger(
        logger_provider,
        "portal",
        config.dev_mode,
        config.enable_file_log,
    );

    let db_pool = ConnectionManager::new_pool(&config.database_url)
        .await
        .context("Failed to initialize database pool")?;

    if config.run_migrations {
        info!("Running migrations...");
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Migrations completed successfully");
    }

    let port = config.port;

    let state = AppState::new(db_pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Server started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown()?;

    Ok(())
}
