use std::{env, future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::ship::repository::{memory::MemoryShipRepository, SeaOrmShipRepository, ShipRepository};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config.toml, or fall back to env vars when it cannot be read
pub fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config file not loaded; using environment");
            config_from_env()?
        }
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn config_from_env() -> Result<AppConfig, StartupError> {
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Ok(backend) = env::var("STORAGE_BACKEND") {
        cfg.storage.backend = backend
            .parse()
            .map_err(|e: anyhow::Error| StartupError::InvalidConfig(e.to_string()))?;
    }
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Open the configured ship store; postgres is migrated before use.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn ShipRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "ship store ready");
            Ok(Arc::new(MemoryShipRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Storage(format!("migration failed: {e}")))?;
            info!(backend = "postgres", "ship store ready");
            Ok(Arc::new(SeaOrmShipRepository { db }))
        }
    }
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server runs
/// until the process is killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "ctrl_c handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and serve until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    run_until(shutdown_signal()).await
}

/// Build the app and serve until `shutdown` resolves, then drain in-flight requests
pub async fn run_until<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let repo = build_repository(&cfg).await?;
    let state = ServerState::new(repo);

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting ship registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("ship registry stopped");
    Ok(())
}
